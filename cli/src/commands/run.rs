//! `devstack run`: select steps and drive the sequencer.

use std::process::ExitCode;

use anyhow::{Result, bail};
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::{Host, Prompter, ProgressReporter};
use crate::application::{Catalog, Sequencer};
use crate::domain::context::keys;
use crate::domain::{ExecutionContext, Selection, SequencerError};
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::fs::LocalFs;
use crate::infra::platform;
use crate::infra::prompt::TerminalPrompter;
use crate::infra::run_log::RunLog;
use crate::output::{TerminalReporter, json};

/// Arguments for the run command.
#[derive(Args, Default)]
pub struct RunArgs {
    /// Run every step in the catalog
    #[arg(long, conflicts_with = "steps")]
    pub all: bool,

    /// Run this step and its dependencies (repeatable)
    #[arg(long = "step", value_name = "NAME")]
    pub steps: Vec<String>,
}

impl RunArgs {
    /// Selection given by flags, `None` when the menu should be shown.
    #[must_use]
    pub fn selection(&self) -> Option<Selection> {
        if self.all {
            Some(Selection::All)
        } else if self.steps.is_empty() {
            None
        } else {
            Some(Selection::Steps(self.steps.clone()))
        }
    }
}

/// Map a menu answer to a selection.
///
/// `0` selects everything, `1..=n` the catalog entry at that position, and a
/// step name selects that step.
///
/// # Errors
///
/// Returns `UnknownStep` naming the input for anything else.
pub fn parse_menu_choice(input: &str, catalog: &Catalog) -> Result<Selection, SequencerError> {
    let input = input.trim();
    if let Ok(n) = input.parse::<usize>() {
        if n == 0 {
            return Ok(Selection::All);
        }
        if let Some(step) = catalog.steps().get(n - 1) {
            return Ok(Selection::one(step.name()));
        }
    } else if catalog.get(input).is_some() {
        return Ok(Selection::one(input));
    }
    Err(SequencerError::UnknownStep(input.to_string()))
}

/// Show the numbered menu and read one choice.
///
/// # Errors
///
/// Returns an error when running non-interactively, when reading fails, or
/// when the answer names no step.
pub fn select_from_menu(
    app: &AppContext,
    catalog: &Catalog,
    prompter: &dyn Prompter,
) -> Result<Selection> {
    if !prompter.is_interactive() {
        bail!("no steps selected: pass --all or --step <NAME> when running non-interactively");
    }
    app.human().render_menu(catalog);
    let answer = prompter.read_line(&format!("Select a step [0-{}]", catalog.len()))?;
    Ok(parse_menu_choice(&answer, catalog)?)
}

/// Environment variables whose values seed the context before any step runs.
const INHERITED_HOMES: [(&str, &str); 2] = [("JAVA_HOME", keys::JAVA_HOME), ("MAVEN_HOME", keys::MAVEN_HOME)];

/// Record tool homes the user already has configured.
///
/// A step that later installs a different home must confirm the switch.
pub fn seed_context(ctx: &mut ExecutionContext, lookup: impl Fn(&str) -> Option<String>) {
    for (var, key) in INHERITED_HOMES {
        if let Some(value) = lookup(var).filter(|v| !v.trim().is_empty()) {
            // Fresh context: nothing is set yet.
            let _ = ctx.set(key, value);
        }
    }
}

/// Run the selected steps and print the report.
///
/// Exits 0 on `Completed` or `CompletedWithWarnings`, 1 on `Aborted`.
///
/// # Errors
///
/// Returns an error if the selection is invalid or cannot be planned, or if
/// the run log cannot be created. No step has run in those cases.
pub async fn run(app: &AppContext, args: &RunArgs) -> Result<ExitCode> {
    let catalog = crate::catalog::build(&app.config)?;
    let prompter = TerminalPrompter::new(app.non_interactive);
    let selection = match args.selection() {
        Some(selection) => selection,
        None => select_from_menu(app, &catalog, &prompter)?,
    };
    // Reject bad selections before touching the log directory.
    catalog.plan(&selection)?;

    let log = RunLog::create(&app.log_dir)?;
    let reporter = TerminalReporter::new(&app.output, Some(&log));
    let runner = TokioCommandRunner::default();
    let fs = LocalFs;
    let host = Host {
        runner: &runner,
        fs: &fs,
        prompter: &prompter,
        reporter: &reporter,
    };

    let platform = platform::detect();
    reporter.info(&format!("Platform: {platform}"));
    reporter.info(&format!("Log file: {}", log.path().display()));

    let mut ctx = ExecutionContext::for_platform(platform);
    seed_context(&mut ctx, |var| std::env::var(var).ok());
    let sequencer = Sequencer::new(catalog);
    let report = sequencer.run(&selection, &mut ctx, &host).await?;
    for (key, value) in ctx.values() {
        reporter.info(&format!("{key} = {value}"));
    }
    reporter.finish();

    if app.is_json() {
        println!("{}", json::format_report(&report)?);
    } else {
        app.human().render_report(&report);
    }

    Ok(if report.status.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
