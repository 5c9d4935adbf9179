//! Human-readable terminal renderer.

use owo_colors::OwoColorize as _;

use crate::application::Catalog;
use crate::domain::{RunReport, RunStatus, StepOutcome};
use crate::output::OutputContext;

/// Renders run reports and the catalog as terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the end-of-run summary.
    ///
    /// Failed steps are listed with the command that retries just them.
    pub fn render_report(&self, report: &RunReport) {
        if !self.ctx.quiet {
            println!();
            self.ctx.header("Summary:");
            for entry in &report.entries {
                let label = format!("{:<9}", entry.outcome.label());
                println!(
                    "  {} {:<18} {}",
                    label.style(self.ctx.styles.outcome(entry.outcome)),
                    entry.step,
                    entry.message
                );
            }
            println!();
        }

        let failed = report.steps_with(StepOutcome::Failed);
        match report.status {
            RunStatus::Completed => self.ctx.success("Environment ready."),
            RunStatus::CompletedWithWarnings => {
                self.ctx
                    .warn(&format!("Completed with {} failed step(s).", failed.len()));
            }
            RunStatus::Aborted => self.ctx.error("Run aborted."),
        }
        for step in failed {
            self.ctx.info(&format!("Retry: devstack run --step {step}"));
        }
    }

    /// Render the catalog as a table.
    pub fn render_catalog(&self, catalog: &Catalog) {
        println!("Available steps:\n");
        for step in catalog.steps() {
            let deps = if step.depends_on().is_empty() {
                String::new()
            } else {
                format!("  (after {})", step.depends_on().join(", "))
            };
            let marker = if step.destructive() { "  [confirms]" } else { "" };
            println!(
                "  {:<18} {}{}{marker}",
                step.name().style(self.ctx.styles.bold),
                step.description(),
                deps.style(self.ctx.styles.dim)
            );
        }
        println!("\nRun one: devstack run --step <name>");
    }

    /// Render the numbered selection menu.
    pub fn render_menu(&self, catalog: &Catalog) {
        println!();
        self.ctx.header("Provisioning steps:");
        println!("  {:>3}) {}", 0, "all steps");
        for (i, step) in catalog.steps().iter().enumerate() {
            println!("  {:>3}) {:<18} {}", i + 1, step.name(), step.description());
        }
        println!();
    }
}
