//! Path resolution for salutis configuration and data files.
//!
//! All salutis data is stored in `~/.salutis/` (or `$SALUTIS_HOME`):
//! - `config.yaml` - Main configuration file
//! - `salutis.db` - SQLite database for courses and enrollments
//! - `logs/` - Log files

use std::path::PathBuf;

use crate::error::SalutisError;

/// Environment variable that overrides the data root.
pub const HOME_ENV: &str = "SALUTIS_HOME";

/// Paths to salutis configuration and data directories.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.salutis/`
    pub root: PathBuf,
    /// Config file: `~/.salutis/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.salutis/salutis.db`
    pub database: PathBuf,
    /// Logs directory: `~/.salutis/logs/`
    pub logs: PathBuf,
}

impl Paths {
    /// Resolve paths from `$SALUTIS_HOME`, falling back to `$HOME/.salutis`.
    ///
    /// # Errors
    ///
    /// Returns an error if neither variable is set.
    pub fn new() -> Result<Self, SalutisError> {
        if let Some(root) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_root(PathBuf::from(root)));
        }

        let home = std::env::var("HOME").map_err(|_| {
            SalutisError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".salutis")))
    }

    /// Create paths with a custom root directory.
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("salutis.db"),
            logs: root.join("logs"),
            root,
        }
    }

    /// Log file path inside the logs directory.
    #[must_use]
    pub fn log_file(&self) -> PathBuf {
        self.logs.join("salutis.log")
    }

    /// Ensure all directories exist, creating them if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), SalutisError> {
        for dir in [&self.root, &self.logs] {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    SalutisError::Config(format!(
                        "Failed to create directory {}: {e}",
                        dir.display()
                    ))
                })?;
            }
        }

        Ok(())
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self::with_root(PathBuf::from(".salutis")))
    }
}
