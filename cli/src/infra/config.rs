//! YAML configuration loading.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::domain::config::DevstackConfig;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "DEVSTACK_CONFIG";

/// Loads `DevstackConfig` from a YAML file on disk.
pub struct YamlConfigStore {
    explicit: Option<PathBuf>,
}

impl YamlConfigStore {
    /// `explicit` comes from `--config`; it wins over `DEVSTACK_CONFIG` and
    /// the default `~/.devstack/config.yaml`.
    #[must_use]
    pub fn new(explicit: Option<PathBuf>) -> Self {
        Self { explicit }
    }

    /// Resolve the config file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.explicit {
            return Ok(path.clone());
        }
        if let Ok(val) = std::env::var(CONFIG_ENV) {
            return Ok(PathBuf::from(val));
        }
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(home.join(".devstack").join("config.yaml"))
    }

    /// Load and validate the config. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, parsed, or
    /// fails validation.
    pub fn load(&self) -> Result<DevstackConfig> {
        let path = self.path()?;
        if !path.exists() {
            return Ok(DevstackConfig::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        let config: DevstackConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("cannot parse {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid configuration in {}", path.display()))?;
        Ok(config)
    }
}
