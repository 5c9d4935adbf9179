//! The `Step` trait: one named, idempotent unit of provisioning work.

use async_trait::async_trait;

use crate::application::ports::Host;
use crate::domain::{ExecutionContext, FailurePolicy, StepError};

/// A provisioning step registered in the catalog.
///
/// `is_satisfied` is mandatory: the sequencer never calls `apply` when it
/// returns `true`, which is what makes a repeated run safe against a
/// partially provisioned host.
#[async_trait]
pub trait Step: Send + Sync {
    /// Unique identifier used for selection and logging.
    fn name(&self) -> &str;

    /// One-line summary shown in `list` and the interactive menu.
    fn description(&self) -> &str;

    /// Steps that must run before this one, in declared order.
    fn depends_on(&self) -> &[&str] {
        &[]
    }

    fn on_failure(&self) -> FailurePolicy {
        FailurePolicy::Abort
    }

    /// Whether `apply` may recreate existing state (always behind a
    /// confirmation).
    fn destructive(&self) -> bool {
        false
    }

    /// Idempotence check, evaluated before `apply`.
    async fn is_satisfied(&self, ctx: &ExecutionContext, host: &Host<'_>) -> Result<bool, StepError>;

    /// Perform the step. Returns the success message for the report.
    async fn apply(&self, ctx: &mut ExecutionContext, host: &Host<'_>) -> Result<String, StepError>;
}
