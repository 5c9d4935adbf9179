//! `maven-settings`: a user `settings.xml`, optionally with a mirror.

use async_trait::async_trait;

use crate::application::exec::resolve_path;
use crate::application::{Host, Step};
use crate::domain::config::MavenConfig;
use crate::domain::context::keys;
use crate::domain::{ExecutionContext, FailurePolicy, StepError};

pub struct MavenSettingsStep {
    config: MavenConfig,
}

impl MavenSettingsStep {
    #[must_use]
    pub fn new(config: MavenConfig) -> Self {
        Self { config }
    }
}

/// Render `settings.xml` with an optional catch-all mirror.
#[must_use]
pub fn render_settings(mirror_url: Option<&str>) -> String {
    let mirrors = mirror_url.map_or_else(String::new, |url| {
        format!(
            "  <mirrors>\n    <mirror>\n      <id>devstack-mirror</id>\n      <mirrorOf>*</mirrorOf>\n      <url>{url}</url>\n    </mirror>\n  </mirrors>\n"
        )
    });
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <settings xmlns=\"http://maven.apache.org/SETTINGS/1.2.0\"\n          \
         xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\"\n          \
         xsi:schemaLocation=\"http://maven.apache.org/SETTINGS/1.2.0 https://maven.apache.org/xsd/settings-1.2.0.xsd\">\n\
         {mirrors}</settings>\n"
    )
}

#[async_trait]
impl Step for MavenSettingsStep {
    fn name(&self) -> &str {
        "maven-settings"
    }

    fn description(&self) -> &str {
        "Write the Maven user settings file"
    }

    fn depends_on(&self) -> &[&str] {
        &["maven"]
    }

    fn on_failure(&self) -> FailurePolicy {
        FailurePolicy::ContinueWithWarning
    }

    async fn is_satisfied(&self, _ctx: &ExecutionContext, host: &Host<'_>) -> Result<bool, StepError> {
        Ok(host.fs.exists(&resolve_path(host, &self.config.settings)?))
    }

    async fn apply(&self, ctx: &mut ExecutionContext, host: &Host<'_>) -> Result<String, StepError> {
        let path = resolve_path(host, &self.config.settings)?;
        host.fs
            .write(&path, &render_settings(self.config.mirror_url.as_deref()))?;
        ctx.set(keys::MAVEN_SETTINGS, path.display().to_string())?;
        Ok(format!("wrote {}", path.display()))
    }
}
