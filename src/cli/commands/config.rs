//! Config command implementation.

use colored::Colorize;

use crate::cli::args::{ConfigCommands, OutputFormat};
use crate::config::{Config, Paths};
use crate::error::SalutisError;
use crate::output::to_json;

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if the file exists and `--force` was not given, or the
/// file cannot be written.
pub fn config(
    paths: &Paths,
    current: &Config,
    cmd: ConfigCommands,
    format: OutputFormat,
) -> Result<String, SalutisError> {
    match cmd {
        ConfigCommands::Show => match format {
            OutputFormat::Json => to_json(current),
            OutputFormat::Pretty => Ok(format!(
                "{} {}\n\n{}",
                "#".dimmed(),
                paths.config_file.display().to_string().dimmed(),
                current.to_yaml()?
            )),
        },
        ConfigCommands::Init { force } => {
            if paths.config_file.exists() && !force {
                return Err(SalutisError::Config(format!(
                    "{} already exists. Use --force to overwrite it.",
                    paths.config_file.display()
                )));
            }
            paths.ensure_dirs()?;
            Config::default().save_to_path(&paths.config_file)?;
            Ok(format!(
                "{} Wrote {}",
                "✓".green(),
                paths.config_file.display()
            ))
        }
    }
}
