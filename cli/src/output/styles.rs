//! Terminal stylesheet (owo-colors), plain until `colorize` is called.

use owo_colors::Style;

use crate::domain::StepOutcome;

#[derive(Default, Clone)]
pub struct Styles {
    pub success: Style,
    pub warning: Style,
    pub error: Style,
    pub info: Style,
    /// Marker for the step currently running.
    pub step: Style,
    /// Steps left alone because they were already satisfied.
    pub skipped: Style,
    /// Steps whose confirmation the user declined.
    pub declined: Style,
    pub dim: Style,
    pub bold: Style,
    pub header: Style,
}

impl Styles {
    /// Switch every entry to its ANSI color.
    pub fn colorize(&mut self) {
        self.success = Style::new().green();
        self.warning = Style::new().yellow();
        self.error = Style::new().red().bold();
        self.info = Style::new().blue();
        self.step = Style::new().cyan();
        self.skipped = Style::new().dimmed();
        self.declined = Style::new().magenta();
        self.dim = Style::new().dimmed();
        self.bold = Style::new().bold();
        self.header = Style::new().bold().underline();
    }

    /// Style for an outcome label in the run summary.
    #[must_use]
    pub fn outcome(&self, outcome: StepOutcome) -> Style {
        match outcome {
            StepOutcome::Skipped => self.skipped,
            StepOutcome::Succeeded => self.success,
            StepOutcome::Failed => self.error,
            StepOutcome::Declined => self.declined,
        }
    }
}
