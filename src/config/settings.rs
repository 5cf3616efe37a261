//! Configuration settings for salutis.
//!
//! Settings are loaded from `~/.salutis/config.yaml`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::error::SalutisError;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Breathing exercise settings.
    pub breathing: BreathingConfig,
    /// Chat relay settings.
    pub chat: ChatConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    /// Color output setting.
    #[serde(default = "default_color")]
    pub color: ColorSetting,
    /// User identity for course progress. Falls back to `$USER`.
    #[serde(default)]
    pub user: Option<String>,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

/// Breathing exercise settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BreathingConfig {
    /// Pattern selected when a session starts.
    #[serde(default = "default_pattern")]
    pub default_pattern: String,
    /// Tick period in milliseconds.
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
    /// Cycles for `breathe run` when `--cycles` is not given.
    #[serde(default = "default_cycles")]
    pub default_cycles: u32,
    /// Extra patterns appended to the built-in catalog.
    #[serde(default)]
    pub custom_patterns: Vec<PatternConfig>,
}

/// A user-defined breathing pattern.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PatternConfig {
    /// Display name, unique within the catalog.
    pub name: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// `[inhale, hold, exhale, pause]` in seconds.
    pub durations: [u32; 4],
}

/// Chat relay settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Chat completions endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Model name sent with each request, if the endpoint needs one.
    #[serde(default)]
    pub model: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `SALUTIS_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions for serde
const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_color() -> ColorSetting {
    ColorSetting::Auto
}

fn default_pattern() -> String {
    "4-7-8 Relaxation".to_string()
}

const fn default_tick_millis() -> u64 {
    1000
}

const fn default_cycles() -> u32 {
    3
}

fn default_endpoint() -> String {
    "https://ai.hackclub.com/chat/completions".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: default_color(),
            user: None,
        }
    }
}

impl Default for BreathingConfig {
    fn default() -> Self {
        Self {
            default_pattern: default_pattern(),
            tick_millis: default_tick_millis(),
            default_cycles: default_cycles(),
            custom_patterns: Vec::new(),
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl BreathingConfig {
    /// Tick period as a [`Duration`].
    ///
    /// # Errors
    ///
    /// Returns a config error when `tick_millis` is zero.
    pub fn tick_period(&self) -> Result<Duration, SalutisError> {
        if self.tick_millis == 0 {
            return Err(SalutisError::Config(
                "breathing.tick_millis must be at least 1".to_string(),
            ));
        }
        Ok(Duration::from_millis(self.tick_millis))
    }
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed, or
    /// holds values that cannot be used.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, SalutisError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            SalutisError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        let config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            SalutisError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })?;
        config.breathing.tick_period()?;
        Ok(config)
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), SalutisError> {
        let contents = self.to_yaml()?;

        std::fs::write(path, contents).map_err(|e| {
            SalutisError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Serialize the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, SalutisError> {
        serde_yaml::to_string(self)
            .map_err(|e| SalutisError::Config(format!("Failed to serialize config: {e}")))
    }

    /// Resolve the acting user for course progress.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` if no user is configured and `$USER` is unset.
    pub fn resolve_user(&self) -> Result<String, SalutisError> {
        self.general
            .user
            .clone()
            .or_else(|| std::env::var("USER").ok())
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .ok_or(SalutisError::NotAuthenticated)
    }
}
