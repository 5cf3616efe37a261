//! Course command implementation.

use colored::Colorize;
use serde_json::json;

use crate::cli::args::{CourseCommands, OutputFormat};
use crate::error::SalutisError;
use crate::features::courses::{CourseProgress, CourseStorage};
use crate::output::{format_course, format_courses, format_module_completed_pretty, to_json};

/// Execute course subcommands for `user`.
///
/// The built-in catalog is seeded first if the database has no courses.
///
/// # Errors
///
/// Returns an error if the course or module cannot be resolved, the user is
/// already enrolled, or a database operation fails.
pub fn course(
    storage: &CourseStorage,
    user: &str,
    cmd: CourseCommands,
    format: OutputFormat,
) -> Result<String, SalutisError> {
    storage.ensure_courses_exist()?;

    match cmd {
        CourseCommands::List => {
            let overview = storage.course_overview(user)?;
            format_courses(&overview, format)
        }
        CourseCommands::Show { course } => {
            let progress = course_progress(storage, user, &course)?;
            format_course(&progress, format)
        }
        CourseCommands::Start { course } => start(storage, user, &course, format),
        CourseCommands::Complete { course, module } => {
            complete(storage, user, &course, &module, format)
        }
    }
}

fn course_progress(
    storage: &CourseStorage,
    user: &str,
    query: &str,
) -> Result<CourseProgress, SalutisError> {
    let course = storage.find_course(query)?;
    let enrollment = storage.get_enrollment(user, course.id)?;
    Ok(CourseProgress::new(course, enrollment))
}

fn start(
    storage: &CourseStorage,
    user: &str,
    query: &str,
    format: OutputFormat,
) -> Result<String, SalutisError> {
    let course = storage.find_course(query)?;
    let enrollment_id = storage.start_course(user, course.id)?;

    match format {
        OutputFormat::Json => to_json(&json!({
            "enrollmentId": enrollment_id,
            "courseId": course.id,
            "title": course.title,
        })),
        OutputFormat::Pretty => Ok(format!(
            "{} Started {} ({} modules)\n  Next: salutis course complete {} 1",
            "✓".green(),
            course.title.bold(),
            course.modules.len(),
            course.id
        )),
    }
}

fn complete(
    storage: &CourseStorage,
    user: &str,
    query: &str,
    module_query: &str,
    format: OutputFormat,
) -> Result<String, SalutisError> {
    let course = storage.find_course(query)?;
    let module = course.resolve_module(module_query).ok_or_else(|| {
        SalutisError::InvalidInput(format!(
            "'{module_query}' is not a module of {}",
            course.title
        ))
    })?;

    let enrollment = storage.get_enrollment(user, course.id)?.ok_or_else(|| {
        SalutisError::NotFound(format!(
            "You have not started {}. Run 'salutis course start {}' first.",
            course.title, course.id
        ))
    })?;

    let updated = storage.complete_module(user, enrollment.id, module)?;

    match format {
        OutputFormat::Json => to_json(&updated),
        OutputFormat::Pretty => Ok(format_module_completed_pretty(&course.title, module, &updated)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Database;

    fn storage() -> CourseStorage {
        CourseStorage::with_database(Database::open_in_memory().unwrap())
    }

    #[test]
    fn test_list_seeds_courses() {
        let storage = storage();
        let out = course(&storage, "alex", CourseCommands::List, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["count"], 6);
    }

    #[test]
    fn test_start_and_complete_flow() {
        let storage = storage();
        let start_cmd = CourseCommands::Start {
            course: "obsessive".to_string(),
        };
        course(&storage, "alex", start_cmd, OutputFormat::Pretty).unwrap();

        for module in ["1", "2", "3"] {
            let cmd = CourseCommands::Complete {
                course: "obsessive".to_string(),
                module: module.to_string(),
            };
            course(&storage, "alex", cmd, OutputFormat::Json).unwrap();
        }

        let show = CourseCommands::Show {
            course: "obsessive".to_string(),
        };
        let out = course(&storage, "alex", show, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["progress"], 100);
        assert_eq!(value["enrollment"]["isCompleted"], true);
    }

    #[test]
    fn test_complete_requires_enrollment() {
        let storage = storage();
        let cmd = CourseCommands::Complete {
            course: "bipolar".to_string(),
            module: "1".to_string(),
        };
        let err = course(&storage, "alex", cmd, OutputFormat::Pretty).unwrap_err();
        assert!(matches!(err, SalutisError::NotFound(_)));
    }

    #[test]
    fn test_complete_unknown_module() {
        let storage = storage();
        let start_cmd = CourseCommands::Start {
            course: "obsessive".to_string(),
        };
        course(&storage, "alex", start_cmd, OutputFormat::Pretty).unwrap();

        let cmd = CourseCommands::Complete {
            course: "obsessive".to_string(),
            module: "9".to_string(),
        };
        let err = course(&storage, "alex", cmd, OutputFormat::Pretty).unwrap_err();
        assert!(matches!(err, SalutisError::InvalidInput(_)));
    }
}
