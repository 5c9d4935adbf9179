//! Tool version parsing from command output.

use std::sync::LazyLock;

use regex::Regex;
use semver::Version;

#[allow(clippy::expect_used)] // compile-time constant pattern
static VERSION_TRIPLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\.(\d+)(?:\.(\d+))?").expect("valid version regex"));

/// First `major.minor[.patch]` found in `output`, leading zeros stripped.
///
/// Docker reports versions such as `24.0.07` or `20.10`, which `semver`
/// rejects as-is.
#[must_use]
pub fn extract_version(output: &str) -> Option<Version> {
    let caps = VERSION_TRIPLE.captures(output)?;
    let part = |i: usize| {
        caps.get(i)
            .map_or(Some(0), |m| m.as_str().parse::<u64>().ok())
    };
    Some(Version::new(part(1)?, part(2)?, part(3)?))
}

/// `true` when `output` contains a version at least `minimum`.
///
/// An unparsable `minimum` accepts any detected version.
#[must_use]
pub fn meets_minimum(output: &str, minimum: &str) -> bool {
    let Some(found) = extract_version(output) else {
        return false;
    };
    extract_version(minimum).is_none_or(|min| found >= min)
}
