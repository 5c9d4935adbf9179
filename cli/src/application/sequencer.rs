//! Provisioning sequencer: runs a selection of the catalog in order.
//!
//! Execution is strictly sequential: steps mutate shared host state (files,
//! daemons, the local service registry) with no isolation between them.

use crate::application::catalog::Catalog;
use crate::application::ports::Host;
use crate::domain::{
    ExecutionContext, FailurePolicy, RunReport, Selection, SequencerError, StepError, StepOutcome,
};

/// Runs catalog selections and produces a `RunReport`.
pub struct Sequencer {
    catalog: Catalog,
}

impl Sequencer {
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Execute `selection`.
    ///
    /// Step-local failures become report entries; only planning errors are
    /// returned as `Err`, and in that case no step has been executed.
    ///
    /// # Errors
    ///
    /// Returns `UnknownStep`, `UnknownDependency`, or `CyclicDependency` from
    /// planning.
    pub async fn run(
        &self,
        selection: &Selection,
        ctx: &mut ExecutionContext,
        host: &Host<'_>,
    ) -> Result<RunReport, SequencerError> {
        let plan = self.catalog.plan(selection)?;
        let reporter = host.reporter;
        let total = plan.len();
        let mut report = RunReport::default();
        let mut aborted = false;

        for (i, step) in plan.iter().enumerate() {
            let name = step.name();
            reporter.step(&format!("[{}/{total}] {name}: {}", i + 1, step.description()));

            let satisfied = step.is_satisfied(ctx, host).await;
            let result = match satisfied {
                Ok(true) => {
                    reporter.info(&format!("{name}: already satisfied, skipping"));
                    report.record(name, StepOutcome::Skipped, "already satisfied");
                    continue;
                }
                Ok(false) => step.apply(ctx, host).await,
                Err(e) => Err(e),
            };

            match result {
                Ok(message) => {
                    reporter.success(&format!("{name}: {message}"));
                    report.record(name, StepOutcome::Succeeded, message);
                }
                Err(StepError::UserAbort(reason)) => {
                    reporter.info(&format!("{name}: {reason}"));
                    report.record(name, StepOutcome::Declined, reason);
                }
                Err(e) => {
                    let detail = e.to_string();
                    reporter.error(&format!("{name} failed: {detail}"));
                    report.record(name, StepOutcome::Failed, detail);
                    match step.on_failure() {
                        FailurePolicy::Abort => {
                            reporter.error(&format!("{name} is required; stopping the run"));
                            aborted = true;
                            break;
                        }
                        FailurePolicy::ContinueWithWarning => {
                            reporter.warn(&format!("continuing without {name}"));
                        }
                    }
                }
            }
        }

        report.finish(aborted);
        Ok(report)
    }
}
