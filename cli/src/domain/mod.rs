//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod config;
pub mod context;
pub mod error;
pub mod plan;
pub mod platform;
pub mod report;
pub mod step;
pub mod version;

pub use config::DevstackConfig;
pub use context::ExecutionContext;
pub use error::{ConfigError, ContextError, SequencerError, StepError};
pub use platform::{Capability, CommandLine, Platform, PlatformCommands};
pub use report::{ReportEntry, RunReport, RunStatus};
pub use step::{FailurePolicy, Selection, StepOutcome};
