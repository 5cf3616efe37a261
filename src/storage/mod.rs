//! Storage layer for salutis.
//!
//! This module provides SQLite-based persistence for:
//! - The course catalog
//! - Per-user course enrollments and module progress

mod database;
mod migrations;

pub use database::Database;
