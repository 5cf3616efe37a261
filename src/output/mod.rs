//! Output formatting for salutis.
//!
//! Every command result is rendered either as colored text or as JSON.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::SalutisError;
use crate::features::breathing::PatternCatalog;
use crate::features::courses::CourseProgress;

pub use json::*;
pub use pretty::*;

/// Format the pattern catalog based on output format
///
/// # Errors
///
/// Returns `SalutisError::Parse` if JSON serialization fails.
pub fn format_patterns(catalog: &PatternCatalog, format: OutputFormat) -> Result<String, SalutisError> {
    match format {
        OutputFormat::Pretty => Ok(format_patterns_pretty(catalog)),
        OutputFormat::Json => format_patterns_json(catalog),
    }
}

/// Format courses with progress based on output format
///
/// # Errors
///
/// Returns `SalutisError::Parse` if JSON serialization fails.
pub fn format_courses(courses: &[CourseProgress], format: OutputFormat) -> Result<String, SalutisError> {
    match format {
        OutputFormat::Pretty => Ok(format_courses_pretty(courses)),
        OutputFormat::Json => format_courses_json(courses),
    }
}

/// Format a single course based on output format
///
/// # Errors
///
/// Returns `SalutisError::Parse` if JSON serialization fails.
pub fn format_course(course: &CourseProgress, format: OutputFormat) -> Result<String, SalutisError> {
    match format {
        OutputFormat::Pretty => Ok(format_course_pretty(course)),
        OutputFormat::Json => to_json(course),
    }
}
