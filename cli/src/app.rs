//! Application context: unified state passed to every command handler.
//!
//! Resolves configuration, the log directory and interactivity once, so
//! command handlers take a single `&AppContext`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::domain::DevstackConfig;
use crate::domain::config::expand_home;
use crate::infra::config::YamlConfigStore;
use crate::infra::run_log::LOG_DIR_ENV;
use crate::output::{HumanRenderer, OutputContext};

/// Environment variable that, like `CI`, makes every run non-interactive.
pub const YES_ENV: &str = "DEVSTACK_YES";

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Behaviour flags.
pub struct BehaviourFlags {
    /// Skip interactive prompts (also set by `CI` / `DEVSTACK_YES` env vars).
    pub yes: bool,
}

/// File locations given on the command line.
pub struct PathFlags {
    pub config: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Behaviour options.
    pub behaviour: BehaviourFlags,
    /// Config and log locations.
    pub paths: PathFlags,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    ///
    /// Quiet in JSON mode so progress lines never mix with the JSON document.
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Validated configuration.
    pub config: DevstackConfig,
    /// Where the run log is written.
    pub log_dir: PathBuf,
    /// When `true`, confirmations return their default and the menu is unavailable.
    ///
    /// Set when `--yes` / `-y` is passed, or when the `CI` or `DEVSTACK_YES`
    /// environment variables are present.
    pub non_interactive: bool,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded or the home
    /// directory cannot be determined.
    pub fn new(flags: &AppFlags) -> Result<Self> {
        let ci_env = std::env::var("CI").is_ok() || std::env::var(YES_ENV).is_ok();
        let non_interactive = flags.behaviour.yes || ci_env;

        let mode = if flags.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        let config = YamlConfigStore::new(flags.paths.config.clone()).load()?;
        let home = dirs::home_dir().context("cannot determine home directory")?;
        let env_dir = std::env::var(LOG_DIR_ENV).ok().map(PathBuf::from);
        let log_dir = resolve_log_dir(
            flags.paths.log_dir.as_deref(),
            env_dir.as_deref(),
            config.log_dir.as_deref(),
            &home,
        );

        Ok(Self {
            output: OutputContext::new(
                flags.output.no_color,
                flags.output.quiet || flags.output.json,
            ),
            mode,
            config,
            log_dir,
            non_interactive,
        })
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    #[must_use]
    pub fn human(&self) -> HumanRenderer<'_> {
        HumanRenderer::new(&self.output)
    }
}

/// Log directory precedence: `--log-dir`, `DEVSTACK_LOG_DIR`, config
/// `log_dir`, then `~/.devstack/logs`. `~/` is expanded against `home`.
#[must_use]
pub fn resolve_log_dir(
    flag: Option<&Path>,
    env: Option<&Path>,
    config: Option<&str>,
    home: &Path,
) -> PathBuf {
    if let Some(dir) = flag.or(env) {
        return expand_home(&dir.to_string_lossy(), home);
    }
    match config {
        Some(dir) => expand_home(dir, home),
        None => home.join(".devstack").join("logs"),
    }
}
