//! The devstack step catalog: every provisioning step, in registration order.

pub mod docker;
pub mod maven_settings;
pub mod oracle;
pub mod payara;
pub mod sdkman;
pub mod source_patch;

use std::time::Duration;

use crate::application::Catalog;
use crate::domain::{DevstackConfig, SequencerError};

/// Poll interval for the Docker daemon readiness wait.
pub const DOCKER_POLL: Duration = Duration::from_secs(2);

/// Poll interval for the Oracle readiness wait.
pub const ORACLE_POLL: Duration = Duration::from_secs(5);

/// Build the catalog from configuration.
///
/// # Errors
///
/// Returns `SequencerError::DuplicateStep` if two steps share a name.
pub fn build(config: &DevstackConfig) -> Result<Catalog, SequencerError> {
    let mut catalog = Catalog::new();
    catalog.register(docker::DockerStep::new(config.docker.clone()))?;
    catalog.register(sdkman::SdkmanStep::new(config.sdkman.clone()))?;
    catalog.register(sdkman::CandidateStep::java(config))?;
    catalog.register(sdkman::CandidateStep::maven(config))?;
    catalog.register(maven_settings::MavenSettingsStep::new(config.maven.clone()))?;
    catalog.register(source_patch::SourcePatchStep::new(config.source.clone()))?;
    catalog.register(oracle::OracleStep::new(config.oracle.clone()))?;
    catalog.register(payara::PayaraDomainsStep::new(config))?;
    catalog.register(payara::PayaraDatasourceStep::new(config))?;
    Ok(catalog)
}
