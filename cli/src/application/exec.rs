//! Helpers shared by catalog steps for invoking external tools.

use std::path::{Path, PathBuf};
use std::process::Output;

use crate::application::ports::Host;
use crate::domain::StepError;

/// Render `program args...` for messages.
#[must_use]
pub fn command_string(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Replace every non-empty secret in `text` with `***`.
#[must_use]
pub fn redact(text: &str, secrets: &[&str]) -> String {
    secrets
        .iter()
        .filter(|s| !s.is_empty())
        .fold(text.to_string(), |acc, s| acc.replace(s, "***"))
}

fn failure_output(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    if stderr.trim().is_empty() {
        String::from_utf8_lossy(&output.stdout).into_owned()
    } else {
        stderr.into_owned()
    }
}

/// Run a command and require a zero exit status.
///
/// # Errors
///
/// Returns `ExternalCommandFailed` with the captured output on a nonzero
/// exit, or `Other` if the command could not be spawned or timed out.
pub async fn run_checked(host: &Host<'_>, program: &str, args: &[&str]) -> Result<Output, StepError> {
    run_checked_redacted(host, program, args, &[]).await
}

/// [`run_checked`] for commands that carry credentials.
///
/// Every occurrence of a value in `secrets` is masked in the error's command
/// line and captured output.
///
/// # Errors
///
/// As [`run_checked`].
pub async fn run_checked_redacted(
    host: &Host<'_>,
    program: &str,
    args: &[&str],
    secrets: &[&str],
) -> Result<Output, StepError> {
    let output = host.runner.run(program, args).await?;
    if output.status.success() {
        Ok(output)
    } else {
        Err(StepError::ExternalCommandFailed {
            command: redact(&command_string(program, args), secrets),
            code: output.status.to_string(),
            output: redact(&failure_output(&output), secrets),
        })
    }
}

/// Ask the user through the prompter, pausing progress output first.
///
/// # Errors
///
/// Returns `Other` if the prompt cannot be shown.
pub fn confirm(host: &Host<'_>, prompt: &str, default: bool) -> Result<bool, StepError> {
    host.reporter.hold();
    Ok(host.prompter.confirm(prompt, default)?)
}

/// Run an installer with inherited stdio so the user sees its progress.
///
/// # Errors
///
/// Returns `ExternalCommandFailed` on a nonzero exit.
pub async fn run_visible(host: &Host<'_>, program: &str, args: &[&str]) -> Result<(), StepError> {
    host.reporter.hold();
    let status = host.runner.run_status(program, args).await?;
    if status.success() {
        Ok(())
    } else {
        Err(StepError::ExternalCommandFailed {
            command: command_string(program, args),
            code: status.to_string(),
            output: String::new(),
        })
    }
}

/// `true` when the command ran and exited 0. Spawn failures count as `false`.
pub async fn probe(host: &Host<'_>, program: &str, args: &[&str]) -> bool {
    host.runner
        .run(program, args)
        .await
        .is_ok_and(|o| o.status.success())
}

/// Stdout of a successful command, `None` otherwise.
pub async fn stdout_of(host: &Host<'_>, program: &str, args: &[&str]) -> Option<String> {
    match host.runner.run(program, args).await {
        Ok(o) if o.status.success() => Some(String::from_utf8_lossy(&o.stdout).into_owned()),
        _ => None,
    }
}

/// Resolve `program` on `PATH`.
///
/// # Errors
///
/// Returns `PrerequisiteMissing` when it is not installed.
pub fn require_program(host: &Host<'_>, program: &str) -> Result<PathBuf, StepError> {
    host.fs
        .which(program)
        .ok_or_else(|| StepError::PrerequisiteMissing(format!("'{program}' not found on PATH")))
}

/// Require that `path` exists.
///
/// # Errors
///
/// Returns `PrerequisiteMissing` naming `what` and the path.
pub fn require_path(host: &Host<'_>, path: &Path, what: &str) -> Result<(), StepError> {
    if host.fs.exists(path) {
        Ok(())
    } else {
        Err(StepError::PrerequisiteMissing(format!(
            "{what} not found at {}",
            path.display()
        )))
    }
}

/// Resolve a configured path, expanding `~/` against the home directory.
///
/// # Errors
///
/// Returns `Other` if the home directory cannot be determined.
pub fn resolve_path(host: &Host<'_>, configured: &str) -> Result<PathBuf, StepError> {
    if configured.starts_with('~') {
        let home = host.fs.home_dir()?;
        Ok(crate::domain::config::expand_home(configured, &home))
    } else {
        Ok(PathBuf::from(configured))
    }
}
