//! Run report: the ordered outcome log of one sequencer run.

use serde::Serialize;

use crate::domain::step::StepOutcome;

/// Overall status of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Completed,
    CompletedWithWarnings,
    Aborted,
}

impl RunStatus {
    /// `true` when the process should exit with status 0.
    #[must_use]
    pub fn is_success(self) -> bool {
        !matches!(self, Self::Aborted)
    }
}

/// One `(step, outcome, message)` tuple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    pub step: String,
    pub outcome: StepOutcome,
    pub message: String,
}

/// Ordered outcome log produced by one run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub status: RunStatus,
    pub entries: Vec<ReportEntry>,
}

impl Default for RunReport {
    fn default() -> Self {
        Self {
            status: RunStatus::Completed,
            entries: Vec::new(),
        }
    }
}

impl RunReport {
    /// Append an entry. Status is derived separately by [`RunReport::finish`].
    pub fn record(&mut self, step: &str, outcome: StepOutcome, message: impl Into<String>) {
        self.entries.push(ReportEntry {
            step: step.to_string(),
            outcome,
            message: message.into(),
        });
    }

    /// Seal the report: `Aborted` if the run stopped early, otherwise
    /// `CompletedWithWarnings` when any entry failed.
    pub fn finish(&mut self, aborted: bool) {
        self.status = if aborted {
            RunStatus::Aborted
        } else if self.entries.iter().any(|e| e.outcome == StepOutcome::Failed) {
            RunStatus::CompletedWithWarnings
        } else {
            RunStatus::Completed
        };
    }

    /// Names of the steps that ended with `outcome`, in execution order.
    #[must_use]
    pub fn steps_with(&self, outcome: StepOutcome) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.outcome == outcome)
            .map(|e| e.step.as_str())
            .collect()
    }

    /// Outcome recorded for `step`, if it was reached.
    #[must_use]
    pub fn outcome_of(&self, step: &str) -> Option<StepOutcome> {
        self.entries.iter().find(|e| e.step == step).map(|e| e.outcome)
    }
}
