//! CLI argument parsing with clap derive

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, AppFlags, BehaviourFlags, OutputFlags, PathFlags};
use crate::commands;

/// Provision a local Java application-server development stack
#[derive(Parser)]
#[command(name = "devstack", version, propagate_version = true)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Never prompt; confirmations take their default (no for destructive ones)
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Config file (default: ~/.devstack/config.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory for run logs (default: ~/.devstack/logs)
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run all steps, or the named steps and what they depend on
    Run(commands::run::RunArgs),

    /// List the provisioning steps
    List,

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// With no subcommand, behaves like `run` without flags: the interactive
    /// step menu.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid, the selection cannot be
    /// planned, or the command fails before producing a report.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            json,
            quiet,
            no_color,
            yes,
            config,
            log_dir,
            command,
        } = self;

        let flags = AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            behaviour: BehaviourFlags { yes },
            paths: PathFlags { config, log_dir },
        };

        match command {
            Some(Command::Version) => {
                commands::version::run(json);
                Ok(ExitCode::SUCCESS)
            }
            Some(Command::List) => {
                let app = AppContext::new(&flags)?;
                commands::list::run(&app)?;
                Ok(ExitCode::SUCCESS)
            }
            Some(Command::Run(args)) => {
                let app = AppContext::new(&flags)?;
                commands::run::run(&app, &args).await
            }
            None => {
                let app = AppContext::new(&flags)?;
                commands::run::run(&app, &commands::run::RunArgs::default()).await
            }
        }
    }
}
