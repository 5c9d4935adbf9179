//! Spinner shown while a step runs (TTY only).

#![allow(clippy::expect_used)] // Template is a constant

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

const TICKS: &[&str] = &["◐", "◓", "◑", "◒", "●"];

/// Spinner labelled with the running step; shows elapsed time so long
/// readiness waits visibly make progress.
///
/// # Panics
///
/// Never in practice: the template is a constant.
#[must_use]
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("  {spinner:.cyan} {wide_msg} {elapsed:>4.dim}")
            .expect("valid template")
            .tick_strings(TICKS),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}
