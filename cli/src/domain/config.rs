//! Domain types and validators for devstack configuration.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

/// Top-level configuration stored in `~/.devstack/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DevstackConfig {
    /// Directory for timestamped run logs.
    pub log_dir: Option<String>,
    pub docker: DockerConfig,
    pub sdkman: SdkmanConfig,
    pub java: JavaConfig,
    pub maven: MavenConfig,
    pub source: SourceConfig,
    pub oracle: OracleConfig,
    pub payara: PayaraConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DockerConfig {
    pub min_version: String,
    pub ready_timeout_secs: u64,
}

impl Default for DockerConfig {
    fn default() -> Self {
        Self {
            min_version: "20.10.0".to_string(),
            ready_timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SdkmanConfig {
    pub dir: String,
}

impl Default for SdkmanConfig {
    fn default() -> Self {
        Self {
            dir: "~/.sdkman".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JavaConfig {
    /// SDKMAN candidate identifier, e.g. `17.0.9-tem`.
    pub version: String,
}

impl Default for JavaConfig {
    fn default() -> Self {
        Self {
            version: "17.0.9-tem".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MavenConfig {
    pub version: String,
    pub settings: String,
    /// Optional repository mirror written into `settings.xml`.
    pub mirror_url: Option<String>,
}

impl Default for MavenConfig {
    fn default() -> Self {
        Self {
            version: "3.9.6".to_string(),
            settings: "~/.m2/settings.xml".to_string(),
            mirror_url: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Git checkout the patch is applied to.
    pub dir: String,
    pub patch: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            dir: "./app".to_string(),
            patch: "./patches/local-dev.patch".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OracleConfig {
    pub image: String,
    pub container: String,
    pub port: u16,
    pub password: String,
    pub ready_timeout_secs: u64,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            image: "gvenzl/oracle-xe:21-slim".to_string(),
            container: "devstack-oracle".to_string(),
            port: 1521,
            password: "oracle".to_string(),
            ready_timeout_secs: 600,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PayaraConfig {
    /// Payara installation root (contains `bin/asadmin`).
    pub home: String,
    pub domains: Vec<DomainConfig>,
    pub datasource: DatasourceConfig,
}

impl Default for PayaraConfig {
    fn default() -> Self {
        Self {
            home: "~/payara6".to_string(),
            domains: vec![DomainConfig::default()],
            datasource: DatasourceConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainConfig {
    pub name: String,
    pub portbase: u16,
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self {
            name: "domain1".to_string(),
            portbase: 4800,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasourceConfig {
    /// Domain the pool and resource are created in.
    pub domain: String,
    pub pool: String,
    pub jndi: String,
    pub user: String,
    pub password: String,
    pub url: String,
}

impl Default for DatasourceConfig {
    fn default() -> Self {
        Self {
            domain: "domain1".to_string(),
            pool: "OraclePool".to_string(),
            jndi: "jdbc/OracleDS".to_string(),
            user: "app".to_string(),
            password: "app".to_string(),
            url: "jdbc:oracle:thin:@localhost:1521/XEPDB1".to_string(),
        }
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

fn invalid(key: &str, value: impl ToString, reason: &str) -> anyhow::Error {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
    .into()
}

impl DevstackConfig {
    /// Check cross-field constraints after deserialization.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for the first offending setting.
    pub fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("java.version", &self.java.version),
            ("maven.version", &self.maven.version),
            ("oracle.container", &self.oracle.container),
            ("oracle.image", &self.oracle.image),
        ] {
            if value.trim().is_empty() {
                return Err(invalid(key, value, "Value must not be empty."));
            }
        }
        if self.docker.ready_timeout_secs == 0 {
            return Err(invalid("docker.ready_timeout_secs", 0, "Timeout must be positive."));
        }
        if self.oracle.ready_timeout_secs == 0 {
            return Err(invalid("oracle.ready_timeout_secs", 0, "Timeout must be positive."));
        }

        let mut seen = HashSet::new();
        for domain in &self.payara.domains {
            if domain.portbase < 1024 {
                return Err(invalid(
                    "payara.domains.portbase",
                    domain.portbase,
                    "Port base must be at least 1024.",
                ));
            }
            if !seen.insert(domain.name.as_str()) {
                return Err(invalid(
                    "payara.domains.name",
                    &domain.name,
                    "Domain names must be unique.",
                ));
            }
        }
        Ok(())
    }
}

/// Expand a leading `~/` against `home`. Other paths are returned unchanged.
#[must_use]
pub fn expand_home(path: &str, home: &Path) -> PathBuf {
    if path == "~" {
        return home.to_path_buf();
    }
    match path.strip_prefix("~/") {
        Some(rest) => home.join(rest),
        None => PathBuf::from(path),
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
