//! Configuration management for salutis.
//!
//! This module handles loading and saving configuration from `~/.salutis/`.

mod paths;
mod settings;

pub use paths::{Paths, HOME_ENV};
pub use settings::{
    BreathingConfig, ChatConfig, ColorSetting, Config, GeneralConfig, LoggingConfig, PatternConfig,
};
