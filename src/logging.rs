//! Logging setup.
//!
//! Events go to `~/.salutis/logs/salutis.log` rather than the terminal, since
//! the TUI owns the screen. The filter comes from `SALUTIS_LOG` when set,
//! otherwise from `logging.level` in the config.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::SalutisError;

/// Environment variable holding a tracing filter directive.
pub const LOG_ENV: &str = "SALUTIS_LOG";

/// Build the filter from `SALUTIS_LOG`, falling back to `level`.
///
/// # Errors
///
/// Returns an error if the fallback directive is invalid.
pub fn build_filter(level: &str) -> Result<EnvFilter, SalutisError> {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| SalutisError::Config(format!("Invalid log level '{level}': {e}")))
}

/// Install the global subscriber writing to `log_file`.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a subscriber is
/// already installed.
pub fn init(log_file: &Path, level: &str) -> Result<(), SalutisError> {
    let filter = build_filter(level)?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .map_err(|e| {
            SalutisError::Config(format!(
                "Failed to open log file {}: {e}",
                log_file.display()
            ))
        })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| SalutisError::Config(format!("Failed to install logger: {e}")))
}
