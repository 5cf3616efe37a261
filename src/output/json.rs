//! JSON output formatting.

use serde::Serialize;
use serde_json::json;

use crate::error::SalutisError;
use crate::features::breathing::{BreathingPattern, PatternCatalog};
use crate::features::courses::CourseProgress;

/// Format the pattern catalog as JSON.
///
/// # Errors
///
/// Returns `SalutisError::Parse` if JSON serialization fails.
pub fn format_patterns_json(catalog: &PatternCatalog) -> Result<String, SalutisError> {
    let items: Vec<&BreathingPattern> = catalog.iter().map(|p| &**p).collect();
    let output = json!({
        "count": items.len(),
        "items": items
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format courses with progress as JSON.
///
/// # Errors
///
/// Returns `SalutisError::Parse` if JSON serialization fails.
pub fn format_courses_json(courses: &[CourseProgress]) -> Result<String, SalutisError> {
    let output = json!({
        "count": courses.len(),
        "items": courses
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Serialize any value as pretty JSON.
///
/// # Errors
///
/// Returns `SalutisError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, SalutisError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_patterns_json() {
        let json = format_patterns_json(&PatternCatalog::builtin()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["count"], 4);
        assert_eq!(value["items"][1]["name"], "Box Breathing");
        assert_eq!(value["items"][0]["durations"], json!([4, 7, 8, 0]));
    }

    #[test]
    fn test_format_courses_json_empty() {
        let json = format_courses_json(&[]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["count"], 0);
        assert_eq!(value["items"], json!([]));
    }
}
