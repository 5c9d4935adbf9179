//! Step metadata shared by the catalog, the planner and the report.

use serde::Serialize;

/// What the sequencer does after a step fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Stop the whole run; later steps are not attempted.
    Abort,
    /// Log a warning and proceed with the next step.
    ContinueWithWarning,
}

/// Outcome of a single step within one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepOutcome {
    /// The idempotence check reported the step as already satisfied.
    Skipped,
    /// `apply` completed.
    Succeeded,
    /// The check or `apply` returned an error.
    Failed,
    /// The user declined a confirmation during `apply`.
    Declined,
}

impl StepOutcome {
    /// Short lowercase label used in summaries and logs.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Skipped => "skipped",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Declined => "declined",
        }
    }
}

/// What the user asked `run` to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Every registered step.
    All,
    /// The named steps plus their dependency closure.
    Steps(Vec<String>),
}

impl Selection {
    /// Selection of exactly one named step.
    #[must_use]
    pub fn one(name: &str) -> Self {
        Self::Steps(vec![name.to_string()])
    }
}
