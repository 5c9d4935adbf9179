//! Run-scoped execution context shared by every step of one run.

use std::collections::BTreeMap;

use crate::domain::error::ContextError;
use crate::domain::platform::{Platform, PlatformCommands};

/// Well-known context keys written by catalog steps.
pub mod keys {
    pub const JAVA_HOME: &str = "java_home";
    pub const MAVEN_HOME: &str = "maven_home";
    pub const MAVEN_SETTINGS: &str = "maven_settings";
    pub const ORACLE_CONTAINER: &str = "oracle_container";
    pub const PAYARA_DOMAINS: &str = "payara_domains";
}

/// Mutable state owned by the sequencer for the duration of one run.
///
/// Values are set once. A later step that wants a different value must go
/// through [`ExecutionContext::replace_confirmed`] after asking the user.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    platform: Platform,
    commands: PlatformCommands,
    values: BTreeMap<String, String>,
}

impl ExecutionContext {
    #[must_use]
    pub fn new(platform: Platform, commands: PlatformCommands) -> Self {
        Self {
            platform,
            commands,
            values: BTreeMap::new(),
        }
    }

    /// Context for `platform` with its built-in command table.
    #[must_use]
    pub fn for_platform(platform: Platform) -> Self {
        Self::new(platform, PlatformCommands::for_platform(platform))
    }

    #[must_use]
    pub fn platform(&self) -> Platform {
        self.platform
    }

    #[must_use]
    pub fn commands(&self) -> &PlatformCommands {
        &self.commands
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Set `key` if unset. Setting the value it already holds is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `ContextError::AlreadySet` if `key` holds a different value.
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> Result<(), ContextError> {
        let value = value.into();
        match self.values.get(key) {
            Some(existing) if *existing != value => Err(ContextError::AlreadySet {
                key: key.to_string(),
                existing: existing.clone(),
            }),
            Some(_) => Ok(()),
            None => {
                self.values.insert(key.to_string(), value);
                Ok(())
            }
        }
    }

    /// Overwrite `key` after the user confirmed the change.
    ///
    /// Callers obtain `confirmed` from the prompter; an unconfirmed replace
    /// leaves the context untouched and returns `false`.
    pub fn replace_confirmed(&mut self, key: &str, value: impl Into<String>, confirmed: bool) -> bool {
        if confirmed {
            self.values.insert(key.to_string(), value.into());
        }
        confirmed
    }

    /// All values in key order.
    pub fn values(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
