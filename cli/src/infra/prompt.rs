//! Terminal implementation of the `Prompter` port (dialoguer).

use anyhow::{Context, Result};
use dialoguer::{Confirm, Input};

use crate::application::ports::Prompter;

/// Prompts on the controlling terminal.
///
/// Unattended runs (`--yes`, `CI`, `DEVSTACK_YES`) never touch the terminal:
/// confirmations return the caller's default.
pub struct TerminalPrompter {
    non_interactive: bool,
}

impl TerminalPrompter {
    #[must_use]
    pub fn new(non_interactive: bool) -> Self {
        Self { non_interactive }
    }
}

impl Prompter for TerminalPrompter {
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if self.non_interactive {
            return Ok(default);
        }
        Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()
            .context("reading confirmation")
    }

    fn read_line(&self, prompt: &str) -> Result<String> {
        if self.non_interactive {
            anyhow::bail!("input required but running non-interactively: {prompt}");
        }
        Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .context("reading input")
    }

    fn is_interactive(&self) -> bool {
        !self.non_interactive
    }
}
