//! `TerminalReporter`: Presentation-layer implementation of `ProgressReporter`.
//!
//! Wraps `&OutputContext` and implements the `application::ports::ProgressReporter`
//! trait so the sequencer can emit progress events without depending on
//! any presentation type directly. Every line is also appended to the run
//! log when one is attached.

use std::sync::Mutex;

use indicatif::ProgressBar;

use crate::application::ports::{Level, ProgressReporter};
use crate::infra::run_log::RunLog;
use crate::output::{OutputContext, progress};

/// Terminal progress reporter that wraps an `OutputContext`.
///
/// - `step()` starts a spinner on a TTY, or prints `"  → {message}"`
/// - `info()` / `success()` / `warn()` print with their marker (suppressed when `ctx.quiet`)
/// - `error()` prints `"  ✗ {message}"` to stderr (never suppressed)
/// - `hold()` clears the spinner before a prompt or a visible child process
pub struct TerminalReporter<'a> {
    ctx: &'a OutputContext,
    log: Option<&'a RunLog>,
    pub(super) spinner: Mutex<Option<ProgressBar>>,
}

impl<'a> TerminalReporter<'a> {
    /// Create a new `TerminalReporter` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext, log: Option<&'a RunLog>) -> Self {
        Self {
            ctx,
            log,
            spinner: Mutex::new(None),
        }
    }

    /// Clear any active spinner. Call before printing the summary.
    pub fn finish(&self) {
        if let Ok(mut guard) = self.spinner.lock()
            && let Some(pb) = guard.take()
        {
            pb.finish_and_clear();
        }
    }
}

impl Drop for TerminalReporter<'_> {
    fn drop(&mut self) {
        self.finish();
    }
}

impl ProgressReporter for TerminalReporter<'_> {
    fn emit(&self, level: Level, message: &str) {
        if let Some(log) = self.log {
            log.append(level, message);
        }

        match level {
            Level::Error => {
                self.finish();
                self.ctx.error(message);
            }
            _ if self.ctx.quiet => {}
            Level::Step if self.ctx.show_progress() => {
                self.finish();
                if let Ok(mut guard) = self.spinner.lock() {
                    *guard = Some(progress::spinner(message));
                }
            }
            Level::Step => self.ctx.step(message),
            Level::Success => {
                self.finish();
                self.ctx.success(message);
            }
            Level::Info | Level::Warn => {
                let line = self.ctx.format_line(level, message);
                match self.spinner.lock().as_deref() {
                    Ok(Some(pb)) => pb.println(line),
                    _ => println!("{line}"),
                }
            }
        }
    }

    fn hold(&self) {
        self.finish();
    }
}
