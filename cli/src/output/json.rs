//! JSON output helpers.
//!
//! Provides the report serializer and the error-object formatter used by all
//! `--json` code paths.

use anyhow::{Context, Result};

use crate::domain::RunReport;

/// Serialize a run report as pretty JSON.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_report(report: &RunReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("JSON serialization failed")
}

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}
