//! SDKMAN and the runtimes it manages (`java`, `maven`).

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::application::exec::{confirm, require_path, require_program, resolve_path, run_visible};
use crate::application::{Host, Step};
use crate::domain::config::{DevstackConfig, SdkmanConfig};
use crate::domain::context::keys;
use crate::domain::{ExecutionContext, StepError};

const INSTALLER_URL: &str = "https://get.sdkman.io?rcupdate=false";

fn init_script(sdkman_dir: &Path) -> PathBuf {
    sdkman_dir.join("bin").join("sdkman-init.sh")
}

/// Install directory of `candidate` at `version` under an SDKMAN root.
#[must_use]
pub fn candidate_dir(sdkman_dir: &Path, candidate: &str, version: &str) -> PathBuf {
    sdkman_dir.join("candidates").join(candidate).join(version)
}

/// `sdkman`: the runtime-version manager itself.
pub struct SdkmanStep {
    config: SdkmanConfig,
}

impl SdkmanStep {
    #[must_use]
    pub fn new(config: SdkmanConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Step for SdkmanStep {
    fn name(&self) -> &str {
        "sdkman"
    }

    fn description(&self) -> &str {
        "Install the SDKMAN runtime manager"
    }

    async fn is_satisfied(&self, _ctx: &ExecutionContext, host: &Host<'_>) -> Result<bool, StepError> {
        let dir = resolve_path(host, &self.config.dir)?;
        Ok(host.fs.exists(&init_script(&dir)))
    }

    async fn apply(&self, _ctx: &mut ExecutionContext, host: &Host<'_>) -> Result<String, StepError> {
        require_program(host, "curl")?;
        require_program(host, "bash")?;
        let dir = resolve_path(host, &self.config.dir)?;

        let script = format!(
            "export SDKMAN_DIR='{}' && curl -s '{INSTALLER_URL}' | bash",
            dir.display()
        );
        run_visible(host, "bash", &["-c", &script]).await?;
        require_path(host, &init_script(&dir), "sdkman-init.sh")?;
        Ok(format!("installed in {}", dir.display()))
    }
}

/// An SDKMAN candidate pinned to one version.
pub struct CandidateStep {
    name: &'static str,
    description: &'static str,
    depends_on: &'static [&'static str],
    candidate: &'static str,
    version: String,
    sdkman_dir: String,
    context_key: &'static str,
}

impl CandidateStep {
    /// `java`: the JDK the application server runs on.
    #[must_use]
    pub fn java(config: &DevstackConfig) -> Self {
        Self {
            name: "java",
            description: "Install the JDK through SDKMAN",
            depends_on: &["sdkman"],
            candidate: "java",
            version: config.java.version.clone(),
            sdkman_dir: config.sdkman.dir.clone(),
            context_key: keys::JAVA_HOME,
        }
    }

    /// `maven`: the build tool; needs a JDK first.
    #[must_use]
    pub fn maven(config: &DevstackConfig) -> Self {
        Self {
            name: "maven",
            description: "Install Maven through SDKMAN",
            depends_on: &["sdkman", "java"],
            candidate: "maven",
            version: config.maven.version.clone(),
            sdkman_dir: config.sdkman.dir.clone(),
            context_key: keys::MAVEN_HOME,
        }
    }

    fn install_dir(&self, host: &Host<'_>) -> Result<PathBuf, StepError> {
        let root = resolve_path(host, &self.sdkman_dir)?;
        Ok(candidate_dir(&root, self.candidate, &self.version))
    }
}

#[async_trait]
impl Step for CandidateStep {
    fn name(&self) -> &str {
        self.name
    }

    fn description(&self) -> &str {
        self.description
    }

    fn depends_on(&self) -> &[&str] {
        self.depends_on
    }

    async fn is_satisfied(&self, _ctx: &ExecutionContext, host: &Host<'_>) -> Result<bool, StepError> {
        Ok(host.fs.exists(&self.install_dir(host)?))
    }

    async fn apply(&self, ctx: &mut ExecutionContext, host: &Host<'_>) -> Result<String, StepError> {
        let root = resolve_path(host, &self.sdkman_dir)?;
        let init = init_script(&root);
        require_path(host, &init, "sdkman-init.sh")?;

        let script = format!(
            "export sdkman_auto_answer=true && source '{}' && sdk install {} {}",
            init.display(),
            self.candidate,
            self.version
        );
        run_visible(host, "bash", &["-c", &script]).await?;

        let dir = candidate_dir(&root, self.candidate, &self.version);
        require_path(host, &dir, &format!("{} {}", self.candidate, self.version))?;
        let home = dir.display().to_string();
        match ctx.get(self.context_key).map(str::to_string) {
            Some(existing) if existing != home => {
                let confirmed = confirm(
                    host,
                    &format!("{} is already {existing}. Switch it to {home}?", self.context_key),
                    false,
                )?;
                if !ctx.replace_confirmed(self.context_key, home, confirmed) {
                    host.reporter
                        .warn(&format!("keeping {} = {existing}", self.context_key));
                }
            }
            _ => ctx.set(self.context_key, home)?,
        }
        Ok(format!("installed {} {}", self.candidate, self.version))
    }
}
