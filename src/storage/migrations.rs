//! Database migrations for salutis.
//!
//! Each migration is a function that upgrades the schema by one version.
//! Migrations are run automatically when the database is opened.

use rusqlite::Connection;
use tracing::info;

use crate::error::SalutisError;

/// Current schema version.
const CURRENT_VERSION: i32 = 1;

/// Get the current schema version from the database.
///
/// Returns 0 if no version has been set (new database).
pub fn get_version(conn: &Connection) -> Result<i32, SalutisError> {
    let version: i32 = conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| SalutisError::Database(format!("Failed to get schema version: {e}")))?;

    Ok(version)
}

/// Set the schema version in the database.
fn set_version(conn: &Connection, version: i32) -> Result<(), SalutisError> {
    conn.execute_batch(&format!("PRAGMA user_version = {version};"))
        .map_err(|e| SalutisError::Database(format!("Failed to set schema version: {e}")))
}

/// Run all pending migrations.
pub fn run(conn: &Connection) -> Result<(), SalutisError> {
    let current = get_version(conn)?;

    if current >= CURRENT_VERSION {
        return Ok(());
    }

    for version in (current + 1)..=CURRENT_VERSION {
        run_migration(conn, version)?;
        set_version(conn, version)?;
        info!(version, "applied database migration");
    }

    Ok(())
}

/// Run a specific migration.
fn run_migration(conn: &Connection, version: i32) -> Result<(), SalutisError> {
    match version {
        1 => migrate_v1(conn),
        _ => Err(SalutisError::Database(format!(
            "Unknown migration version: {version}"
        ))),
    }
}

/// Migration v1: Initial schema.
///
/// Creates tables for:
/// - `courses`: course catalog, module names stored as a JSON array
/// - `user_courses`: one enrollment per user and course
fn migrate_v1(conn: &Connection) -> Result<(), SalutisError> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS courses (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL UNIQUE,
            description TEXT NOT NULL,
            modules TEXT NOT NULL DEFAULT '[]'
        );

        CREATE TABLE IF NOT EXISTS user_courses (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL,
            course_id INTEGER NOT NULL REFERENCES courses(id) ON DELETE CASCADE,
            started_at TEXT NOT NULL,
            completed_modules TEXT NOT NULL DEFAULT '[]',
            is_completed INTEGER NOT NULL DEFAULT 0,
            UNIQUE (user_id, course_id)
        );

        CREATE INDEX IF NOT EXISTS idx_user_courses_user
        ON user_courses(user_id);
        ",
    )
    .map_err(|e| SalutisError::Database(format!("Migration v1 failed: {e}")))
}
