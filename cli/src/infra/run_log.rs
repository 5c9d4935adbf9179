//! Timestamped run log: persists every reporter line to disk.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};

use crate::application::ports::Level;

/// Environment variable overriding the log directory.
pub const LOG_DIR_ENV: &str = "DEVSTACK_LOG_DIR";

/// Append-only log file named after the run's start time.
pub struct RunLog {
    path: PathBuf,
    file: Mutex<File>,
}

/// `devstack-YYYYMMDD-HHMMSS.log` for a run started at `started`.
#[must_use]
pub fn log_file_name(started: DateTime<Local>) -> String {
    format!("devstack-{}.log", started.format("%Y%m%d-%H%M%S"))
}

/// One persisted line: `2026-10-16T09:30:00+02:00 SUCCESS docker: ready`.
#[must_use]
pub fn format_line(at: DateTime<Local>, level: Level, message: &str) -> String {
    format!("{} {:<7} {message}", at.to_rfc3339_opts(chrono::SecondsFormat::Secs, false), level.as_str())
}

impl RunLog {
    /// Create a new log file in `dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be created.
    pub fn create(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating log directory {}", dir.display()))?;
        let path = dir.join(log_file_name(Local::now()));
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("opening log file {}", path.display()))?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one line. Write errors are ignored so logging never fails a run.
    pub fn append(&self, level: Level, message: &str) {
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{}", format_line(Local::now(), level, message));
        }
    }
}
