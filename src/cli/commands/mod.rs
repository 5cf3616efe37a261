//! Command implementations for salutis.
//!
//! Each command returns its formatted output; `main` prints it.

mod breathe;
mod chat;
mod config;
mod course;

pub use breathe::{breathe, run_exercise, ExerciseSummary};
pub use chat::{chat, interactive};
pub use config::config;
pub use course::course;

use std::io::IsTerminal;

use clap_complete::Shell;
use colored::Colorize;

use crate::error::SalutisError;
use crate::features::shell::completions::{generate_completions, install_hint};

/// Execute the completions command.
///
/// When stdout is a terminal, an install hint is also written to stderr.
///
/// # Errors
///
/// Returns an error if the script cannot be generated.
pub fn completions(shell: Shell) -> Result<String, SalutisError> {
    let script = generate_completions(shell)?;
    if std::io::stdout().is_terminal() {
        eprintln!("{}", install_hint(shell).dimmed());
    }
    Ok(script)
}
