//! `oracle-db`: the Oracle database container, running and ready.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};

use crate::application::exec::{confirm, require_program, run_checked, run_checked_redacted, stdout_of};
use crate::application::wait::wait_until;
use crate::application::{Host, Step};
use crate::domain::config::OracleConfig;
use crate::domain::context::keys;
use crate::domain::{ExecutionContext, StepError};

/// Log line the Oracle images print once the database accepts connections.
pub const READY_MARKER: &str = "DATABASE IS READY TO USE!";

pub struct OracleStep {
    config: OracleConfig,
    poll: Duration,
}

impl OracleStep {
    #[must_use]
    pub fn new(config: OracleConfig) -> Self {
        Self {
            config,
            poll: super::ORACLE_POLL,
        }
    }

    /// Override the readiness poll interval.
    #[must_use]
    pub fn with_poll(mut self, poll: Duration) -> Self {
        self.poll = poll;
        self
    }

    /// `docker inspect` status of the container, `None` when it does not exist.
    async fn container_status(&self, host: &Host<'_>) -> Option<String> {
        stdout_of(
            host,
            "docker",
            &["inspect", "-f", "{{.State.Status}}", &self.config.container],
        )
        .await
        .map(|s| s.trim().to_string())
    }

    async fn create_container(&self, host: &Host<'_>) -> Result<(), StepError> {
        let port = format!("{}:1521", self.config.port);
        let password = format!("ORACLE_PASSWORD={}", self.config.password);
        run_checked_redacted(
            host,
            "docker",
            &[
                "run",
                "-d",
                "--name",
                &self.config.container,
                "-p",
                &port,
                "-e",
                &password,
                &self.config.image,
            ],
            &[&self.config.password],
        )
        .await?;
        Ok(())
    }
}

/// Whether the container logged the ready marker at or after `since`.
///
/// Earlier boots of a restarted container leave the marker in its log.
async fn logs_ready(host: &Host<'_>, container: &str, since: &str) -> bool {
    match host.runner.run("docker", &["logs", "--since", since, container]).await {
        Ok(out) => {
            String::from_utf8_lossy(&out.stdout).contains(READY_MARKER)
                || String::from_utf8_lossy(&out.stderr).contains(READY_MARKER)
        }
        Err(_) => false,
    }
}

#[async_trait]
impl Step for OracleStep {
    fn name(&self) -> &str {
        "oracle-db"
    }

    fn description(&self) -> &str {
        "Run the Oracle database container"
    }

    fn depends_on(&self) -> &[&str] {
        &["docker"]
    }

    fn destructive(&self) -> bool {
        true
    }

    async fn is_satisfied(&self, _ctx: &ExecutionContext, host: &Host<'_>) -> Result<bool, StepError> {
        Ok(self.container_status(host).await.as_deref() == Some("running"))
    }

    async fn apply(&self, ctx: &mut ExecutionContext, host: &Host<'_>) -> Result<String, StepError> {
        require_program(host, "docker")?;
        let name = self.config.container.as_str();
        let status = self.container_status(host).await;
        let since = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

        let action = match status {
            Some(status) => {
                let recreate = confirm(
                    host,
                    &format!(
                        "Container '{name}' exists ({status}). Recreate it from {}? Its data will be lost",
                        self.config.image
                    ),
                    false,
                )?;
                if recreate {
                    run_checked(host, "docker", &["rm", "-f", name]).await?;
                    self.create_container(host).await?;
                    "recreated"
                } else {
                    run_checked(host, "docker", &["start", name]).await?;
                    "restarted"
                }
            }
            None => {
                self.create_container(host).await?;
                "created"
            }
        };

        host.reporter.info(&format!(
            "waiting up to {}s for the database in '{name}'",
            self.config.ready_timeout_secs
        ));
        wait_until(
            &format!("the database in '{name}'"),
            Duration::from_secs(self.config.ready_timeout_secs),
            self.poll,
            || logs_ready(host, name, &since),
        )
        .await?;

        ctx.set(keys::ORACLE_CONTAINER, name)?;
        Ok(format!("container '{name}' {action} and ready on port {}", self.config.port))
    }
}
