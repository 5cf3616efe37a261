//! Shell integration.

pub mod completions;
