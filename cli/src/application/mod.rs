//! Application layer: port trait definitions and use-case orchestration.
//!
//! This module depends only on `crate::domain`, never on `crate::infra`,
//! `crate::commands`, or `crate::output`.

pub mod catalog;
pub mod exec;
pub mod ports;
pub mod sequencer;
pub mod step;
pub mod wait;

pub use catalog::Catalog;
pub use ports::{CommandRunner, Host, HostFs, Level, ProgressReporter, Prompter};
pub use sequencer::Sequencer;
pub use step::Step;
