//! Host platform detection.

use crate::domain::Platform;

/// Detect the running platform from the compile target and `/etc/os-release`.
#[must_use]
pub fn detect() -> Platform {
    let os_release = std::fs::read_to_string("/etc/os-release").ok();
    Platform::classify(std::env::consts::OS, os_release.as_deref())
}
