//! Per-user course enrollment.

use chrono::{DateTime, Local, Utc};
use serde::Serialize;

use super::catalog::{progress_percentage, Course};

/// A user's enrollment in one course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    /// Database ID
    pub id: i64,
    /// Owning user
    pub user_id: String,
    /// Enrolled course
    pub course_id: i64,
    /// When the user started the course
    pub started_at: DateTime<Utc>,
    /// Completed module names in completion order
    pub completed_modules: Vec<String>,
    /// Whether every module of the course is completed
    pub is_completed: bool,
}

impl Enrollment {
    /// Whether `module` has been completed.
    #[must_use]
    pub fn has_completed(&self, module: &str) -> bool {
        self.completed_modules.iter().any(|m| m == module)
    }

    /// Start time in local timezone.
    #[must_use]
    pub fn started_at_local(&self) -> DateTime<Local> {
        self.started_at.with_timezone(&Local)
    }
}

/// An enrollment joined with its course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrolledCourse {
    /// The enrollment row
    #[serde(flatten)]
    pub enrollment: Enrollment,
    /// Course details, if the course still exists
    pub course: Option<Course>,
}

impl EnrolledCourse {
    /// Completion percentage.
    #[must_use]
    pub fn progress_percentage(&self) -> u8 {
        let total = self.course.as_ref().map_or(0, |c| c.modules.len());
        progress_percentage(self.enrollment.completed_modules.len(), total)
    }
}

/// A course with the user's enrollment, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseProgress {
    #[serde(flatten)]
    pub course: Course,
    pub enrollment: Option<Enrollment>,
    /// Completion percentage, 0 when not enrolled
    pub progress: u8,
}

impl CourseProgress {
    /// Combine a course with the user's enrollment in it.
    #[must_use]
    pub fn new(course: Course, enrollment: Option<Enrollment>) -> Self {
        let completed = enrollment.as_ref().map_or(0, |e| e.completed_modules.len());
        let progress = progress_percentage(completed, course.modules.len());
        Self {
            course,
            enrollment,
            progress,
        }
    }

    /// Whether `module` is completed by the user.
    #[must_use]
    pub fn is_module_completed(&self, module: &str) -> bool {
        self.enrollment.as_ref().is_some_and(|e| e.has_completed(module))
    }
}

/// Result of seeding the course table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedOutcome {
    /// Human-readable summary
    pub message: String,
    /// Number of courses in the table afterwards
    pub count: usize,
    /// IDs inserted by this call (empty if nothing was seeded)
    pub course_ids: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enrolled_course_progress() {
        let enrolled = EnrolledCourse {
            enrollment: Enrollment {
                id: 1,
                user_id: "u".to_string(),
                course_id: 1,
                started_at: Utc::now(),
                completed_modules: vec!["A".to_string()],
                is_completed: false,
            },
            course: Some(Course {
                id: 1,
                title: "T".to_string(),
                description: String::new(),
                modules: vec!["A".to_string(), "B".to_string()],
            }),
        };

        assert_eq!(enrolled.progress_percentage(), 50);
        assert!(enrolled.enrollment.has_completed("A"));
        assert!(!enrolled.enrollment.has_completed("B"));

        let json = serde_json::to_string(&enrolled).unwrap();
        assert!(json.contains("\"completedModules\":[\"A\"]"));
        assert!(json.contains("\"course\":{"));

        let progress = CourseProgress::new(
            enrolled.course.clone().unwrap(),
            Some(enrolled.enrollment.clone()),
        );
        assert_eq!(progress.progress, 50);
        assert!(progress.is_module_completed("A"));

        let not_enrolled = CourseProgress::new(enrolled.course.unwrap(), None);
        assert_eq!(not_enrolled.progress, 0);
        assert!(!not_enrolled.is_module_completed("A"));
    }
}
