//! `docker`: container runtime installed, running, and recent enough.

use std::time::Duration;

use async_trait::async_trait;

use crate::application::exec::{probe, run_visible, stdout_of};
use crate::application::wait::wait_until;
use crate::application::{Host, Step};
use crate::domain::config::DockerConfig;
use crate::domain::version::{extract_version, meets_minimum};
use crate::domain::{Capability, ExecutionContext, StepError};

const SERVER_VERSION: &[&str] = &["version", "--format", "{{.Server.Version}}"];

pub struct DockerStep {
    config: DockerConfig,
    poll: Duration,
}

impl DockerStep {
    #[must_use]
    pub fn new(config: DockerConfig) -> Self {
        Self {
            config,
            poll: super::DOCKER_POLL,
        }
    }

    /// Override the readiness poll interval.
    #[must_use]
    pub fn with_poll(mut self, poll: Duration) -> Self {
        self.poll = poll;
        self
    }
}

#[async_trait]
impl Step for DockerStep {
    fn name(&self) -> &str {
        "docker"
    }

    fn description(&self) -> &str {
        "Install and start the Docker engine"
    }

    async fn is_satisfied(&self, _ctx: &ExecutionContext, host: &Host<'_>) -> Result<bool, StepError> {
        Ok(stdout_of(host, "docker", SERVER_VERSION)
            .await
            .is_some_and(|v| meets_minimum(&v, &self.config.min_version)))
    }

    async fn apply(&self, ctx: &mut ExecutionContext, host: &Host<'_>) -> Result<String, StepError> {
        if host.fs.which("docker").is_none() {
            let install = ctx.commands().get(Capability::InstallDocker).cloned().ok_or_else(|| {
                StepError::PrerequisiteMissing(format!(
                    "docker is not installed and no install command is known for {}",
                    ctx.platform()
                ))
            })?;
            host.reporter.info(&format!("installing Docker: {install}"));
            run_visible(host, &install.program, &install.arg_refs()).await?;
        }

        if !probe(host, "docker", &["info"]).await {
            if let Some(start) = ctx.commands().get(Capability::StartDocker).cloned() {
                host.reporter.info(&format!("starting Docker: {start}"));
                run_visible(host, &start.program, &start.arg_refs()).await?;
            }
            host.reporter.info(&format!(
                "waiting up to {}s for the Docker daemon",
                self.config.ready_timeout_secs
            ));
            wait_until(
                "the Docker daemon",
                Duration::from_secs(self.config.ready_timeout_secs),
                self.poll,
                || probe(host, "docker", &["info"]),
            )
            .await?;
        }

        let reported = stdout_of(host, "docker", SERVER_VERSION).await.unwrap_or_default();
        let version = extract_version(&reported).map_or_else(|| "unknown".to_string(), |v| v.to_string());
        if !meets_minimum(&reported, &self.config.min_version) {
            return Err(StepError::PrerequisiteMissing(format!(
                "Docker {version} is older than the required {}; upgrade it manually",
                self.config.min_version
            )));
        }
        Ok(format!("Docker {version} running"))
    }
}
