//! `source-patch`: local-development patch applied to the application checkout.
//!
//! "Already applied" is decided by a reverse dry run. A patch that applies in
//! neither direction fails the step; it is never forced.

use std::path::PathBuf;

use anyhow::Context as _;
use async_trait::async_trait;

use crate::application::exec::{probe, require_path, require_program, resolve_path, run_checked};
use crate::application::{Host, Step};
use crate::domain::config::SourceConfig;
use crate::domain::{ExecutionContext, FailurePolicy, StepError};

pub struct SourcePatchStep {
    config: SourceConfig,
}

impl SourcePatchStep {
    #[must_use]
    pub fn new(config: SourceConfig) -> Self {
        Self { config }
    }

    /// Checkout and absolute patch path, both verified to exist.
    fn paths(&self, host: &Host<'_>) -> Result<(String, String), StepError> {
        require_program(host, "git")?;
        let dir = resolve_path(host, &self.config.dir)?;
        require_path(host, &dir, "source directory")?;
        let patch = resolve_path(host, &self.config.patch)?;
        require_path(host, &patch, "patch file")?;
        // git resolves relative patch paths against `-C`, not our cwd.
        let patch: PathBuf = std::path::absolute(&patch)
            .with_context(|| format!("resolving {}", patch.display()))?;
        Ok((dir.display().to_string(), patch.display().to_string()))
    }
}

#[async_trait]
impl Step for SourcePatchStep {
    fn name(&self) -> &str {
        "source-patch"
    }

    fn description(&self) -> &str {
        "Apply the local-development source patch"
    }

    fn on_failure(&self) -> FailurePolicy {
        FailurePolicy::ContinueWithWarning
    }

    async fn is_satisfied(&self, _ctx: &ExecutionContext, host: &Host<'_>) -> Result<bool, StepError> {
        let (dir, patch) = self.paths(host)?;
        Ok(probe(host, "git", &["-C", &dir, "apply", "--check", "--reverse", &patch]).await)
    }

    async fn apply(&self, _ctx: &mut ExecutionContext, host: &Host<'_>) -> Result<String, StepError> {
        let (dir, patch) = self.paths(host)?;
        run_checked(host, "git", &["-C", &dir, "apply", "--check", &patch])
            .await
            .map_err(|e| match e {
                StepError::ExternalCommandFailed {
                    command,
                    code,
                    output,
                } => StepError::ExternalCommandFailed {
                    command,
                    code,
                    output: format!(
                        "patch neither applies cleanly nor is already applied; resolve by hand\n{output}"
                    ),
                },
                other => other,
            })?;
        run_checked(host, "git", &["-C", &dir, "apply", &patch]).await?;
        Ok(format!("applied {patch}"))
    }
}
