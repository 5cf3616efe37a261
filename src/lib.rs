//! salutis - mental health support in the terminal
//!
//! Guided breathing exercises driven by a cancellable tick source,
//! self-help courses with per-user progress in `SQLite`, and a support chat
//! relayed to a completion service.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod features;
pub mod logging;
pub mod output;
pub mod storage;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::SalutisError;
