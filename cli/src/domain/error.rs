//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Step errors ───────────────────────────────────────────────────────────────

/// Errors raised by a step's idempotence check or apply action.
///
/// The sequencer converts every variant into a report entry; none of them
/// escape a run.
#[derive(Debug, Error)]
pub enum StepError {
    #[error("prerequisite missing: {0}")]
    PrerequisiteMissing(String),

    #[error("declined: {0}")]
    UserAbort(String),

    #[error("`{command}` exited with {code}{}", format_output(.output))]
    ExternalCommandFailed {
        command: String,
        code: String,
        output: String,
    },

    #[error("timed out after {seconds}s waiting for {what}")]
    TimeoutExceeded { what: String, seconds: u64 },

    #[error(transparent)]
    Context(#[from] ContextError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn format_output(output: &str) -> String {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {trimmed}")
    }
}

// ── Sequencer errors ──────────────────────────────────────────────────────────

/// Catalog definition and selection errors. Always fatal, never retried.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SequencerError {
    #[error("Step '{0}' is already registered.")]
    DuplicateStep(String),

    #[error("Unknown step '{0}'. Run 'devstack list' to see available steps.")]
    UnknownStep(String),

    #[error("Step '{step}' depends on unknown step '{dependency}'.")]
    UnknownDependency { step: String, dependency: String },

    #[error("Dependency cycle detected at step '{0}'.")]
    CyclicDependency(String),
}

// ── Context errors ────────────────────────────────────────────────────────────

/// Errors raised by `ExecutionContext` mutation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContextError {
    #[error("'{key}' is already set to '{existing}'")]
    AlreadySet { key: String, existing: String },
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}\n\n{reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}
