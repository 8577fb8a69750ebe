//! Completions command.
//!
//! Writes a completion script for the chosen shell to stdout.

use clap::CommandFactory;
use clap_complete::{generate, Shell as CompletionShell};

use crate::cli::{Cli, Shell};
use crate::error::Result;

pub fn execute(shell: Shell) -> Result<()> {
    let shell = match shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
    };
    generate(shell, &mut Cli::command(), "pnut", &mut std::io::stdout());
    Ok(())
}
