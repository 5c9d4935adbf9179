//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.
//!
//! Ports are object-safe so one `Host` of `&dyn` references can be handed to
//! every step in the catalog.

use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(&self, program: &str, args: &[&str], timeout: Duration)
    -> Result<Output>;
    /// Run a program with inherited stdio and return only its exit status.
    ///
    /// Used for installers whose progress the user should see.
    async fn run_status(&self, program: &str, args: &[&str]) -> Result<std::process::ExitStatus>;
}

// ── Filesystem Port ───────────────────────────────────────────────────────────

/// Abstracts filesystem and `PATH` lookups used by idempotence checks.
pub trait HostFs: Send + Sync {
    /// Whether `path` exists.
    fn exists(&self, path: &Path) -> bool;
    /// Read a UTF-8 file.
    fn read_to_string(&self, path: &Path) -> Result<String>;
    /// Write `content`, creating parent directories.
    fn write(&self, path: &Path, content: &str) -> Result<()>;
    /// Resolve a program on `PATH`.
    fn which(&self, program: &str) -> Option<PathBuf>;
    /// The user's home directory.
    fn home_dir(&self) -> Result<PathBuf>;
}

// ── Prompt Port ───────────────────────────────────────────────────────────────

/// Abstracts user interaction so steps stay testable without a terminal.
pub trait Prompter: Send + Sync {
    /// Ask a yes/no question.
    ///
    /// Empty input selects `default`. Unattended runs return `default`
    /// without prompting, so destructive questions pass `false`.
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;
    /// Read one line of free-form input.
    fn read_line(&self, prompt: &str) -> Result<String>;
    /// `false` when running unattended (`--yes`, `CI`).
    fn is_interactive(&self) -> bool;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Message severity understood by every reporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Step,
    Success,
    Warn,
    Error,
}

impl Level {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Step => "STEP",
            Self::Success => "SUCCESS",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait, no async needed.
pub trait ProgressReporter: Send + Sync {
    /// Emit a leveled message.
    fn emit(&self, level: Level, message: &str);

    /// Emit an informational message.
    fn info(&self, message: &str) {
        self.emit(Level::Info, message);
    }
    /// Emit an in-progress step message.
    fn step(&self, message: &str) {
        self.emit(Level::Step, message);
    }
    /// Emit a success message.
    fn success(&self, message: &str) {
        self.emit(Level::Success, message);
    }
    /// Emit a warning message.
    fn warn(&self, message: &str) {
        self.emit(Level::Warn, message);
    }
    /// Emit an error message.
    fn error(&self, message: &str) {
        self.emit(Level::Error, message);
    }

    /// Stop any live progress indicator before the terminal is handed to a
    /// prompt or a child process.
    fn hold(&self) {}
}

// ── Host bundle ───────────────────────────────────────────────────────────────

/// Every capability a step may use, bundled for one run.
#[derive(Clone, Copy)]
pub struct Host<'a> {
    pub runner: &'a dyn CommandRunner,
    pub fs: &'a dyn HostFs,
    pub prompter: &'a dyn Prompter,
    pub reporter: &'a dyn ProgressReporter,
}
