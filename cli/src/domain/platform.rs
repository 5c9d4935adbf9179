//! Host platform identification and the per-platform command table.
//!
//! Parsing only; reading `/etc/os-release` happens in `crate::infra::platform`.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

#[allow(clippy::expect_used)] // compile-time constant pattern
static OS_RELEASE_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^(ID|ID_LIKE)="?([^"\n]*)"?\s*$"#).expect("valid os-release regex")
});

/// Platform families with distinct install/start commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Debian,
    Fedora,
    Arch,
    MacOs,
    Other,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Debian => "debian",
            Self::Fedora => "fedora",
            Self::Arch => "arch",
            Self::MacOs => "macos",
            Self::Other => "other",
        };
        f.write_str(name)
    }
}

impl Platform {
    /// Classify a host from `std::env::consts::OS` and, on Linux, the
    /// contents of `/etc/os-release`.
    #[must_use]
    pub fn classify(os: &str, os_release: Option<&str>) -> Self {
        match os {
            "macos" => Self::MacOs,
            "linux" => os_release.map_or(Self::Other, Self::from_os_release),
            _ => Self::Other,
        }
    }

    /// Classify a Linux distribution from `ID` / `ID_LIKE`.
    #[must_use]
    pub fn from_os_release(content: &str) -> Self {
        let ids: Vec<&str> = OS_RELEASE_KEY
            .captures_iter(content)
            .filter_map(|c| c.get(2))
            .flat_map(|m| m.as_str().split_whitespace())
            .collect();

        for id in &ids {
            match *id {
                "debian" | "ubuntu" => return Self::Debian,
                "fedora" | "rhel" | "centos" => return Self::Fedora,
                "arch" => return Self::Arch,
                _ => {}
            }
        }
        Self::Other
    }
}

/// Operations whose command line differs per platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Capability {
    InstallDocker,
    StartDocker,
}

/// A program plus its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    #[must_use]
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| (*a).to_string()).collect(),
        }
    }

    /// Borrowed argument slice for `CommandRunner` calls.
    #[must_use]
    pub fn arg_refs(&self) -> Vec<&str> {
        self.args.iter().map(String::as_str).collect()
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Capability lookup for one platform, injected into the execution context.
#[derive(Debug, Clone, Default)]
pub struct PlatformCommands {
    variants: BTreeMap<Capability, CommandLine>,
}

impl PlatformCommands {
    /// The built-in table for `platform`.
    #[must_use]
    pub fn for_platform(platform: Platform) -> Self {
        let mut variants = BTreeMap::new();
        match platform {
            Platform::Debian => {
                variants.insert(
                    Capability::InstallDocker,
                    CommandLine::new("sudo", &["apt-get", "install", "-y", "docker.io"]),
                );
                variants.insert(
                    Capability::StartDocker,
                    CommandLine::new("sudo", &["systemctl", "enable", "--now", "docker"]),
                );
            }
            Platform::Fedora => {
                variants.insert(
                    Capability::InstallDocker,
                    CommandLine::new("sudo", &["dnf", "install", "-y", "moby-engine"]),
                );
                variants.insert(
                    Capability::StartDocker,
                    CommandLine::new("sudo", &["systemctl", "enable", "--now", "docker"]),
                );
            }
            Platform::Arch => {
                variants.insert(
                    Capability::InstallDocker,
                    CommandLine::new("sudo", &["pacman", "-S", "--noconfirm", "docker"]),
                );
                variants.insert(
                    Capability::StartDocker,
                    CommandLine::new("sudo", &["systemctl", "enable", "--now", "docker"]),
                );
            }
            Platform::MacOs => {
                variants.insert(
                    Capability::InstallDocker,
                    CommandLine::new("brew", &["install", "--cask", "docker"]),
                );
                variants.insert(
                    Capability::StartDocker,
                    CommandLine::new("open", &["-a", "Docker"]),
                );
            }
            Platform::Other => {}
        }
        Self { variants }
    }

    /// Override or add a variant.
    #[must_use]
    pub fn with(mut self, capability: Capability, command: CommandLine) -> Self {
        self.variants.insert(capability, command);
        self
    }

    #[must_use]
    pub fn get(&self, capability: Capability) -> Option<&CommandLine> {
        self.variants.get(&capability)
    }
}
