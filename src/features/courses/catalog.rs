//! Course definitions and the built-in course list.

use serde::{Deserialize, Serialize};

/// Conditions covered by the built-in courses: title, topic, description.
const BUILTIN_COURSES: [(&str, &str, &str); 6] = [
    (
        "Depression Course",
        "Depression",
        "Learn to understand and manage depression",
    ),
    (
        "Schizophrenia Course",
        "Schizophrenia",
        "Understanding and managing schizophrenia",
    ),
    (
        "Obsessive Compulsive Disorder (OCD) Course",
        "OCD",
        "Managing OCD symptoms and behaviors",
    ),
    (
        "Post-traumatic Stress Disorder (PTSD) Course",
        "PTSD",
        "Healing from trauma and managing PTSD",
    ),
    (
        "Bipolar Disorder Course",
        "Bipolar Disorder",
        "Understanding mood swings and stability",
    ),
    (
        "Panic Disorder Course",
        "Panic Disorder",
        "Managing panic attacks and anxiety",
    ),
];

/// A course stored in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Database ID
    pub id: i64,
    /// Unique title
    pub title: String,
    /// One-line description
    pub description: String,
    /// Module names in order
    pub modules: Vec<String>,
}

impl Course {
    /// Whether `module` belongs to this course.
    #[must_use]
    pub fn has_module(&self, module: &str) -> bool {
        self.modules.iter().any(|m| m == module)
    }

    /// Resolve user input to a module name: exact name, case-insensitive
    /// name, or a 1-based index.
    #[must_use]
    pub fn resolve_module(&self, query: &str) -> Option<&str> {
        let query = query.trim();
        if let Some(m) = self.modules.iter().find(|m| *m == query) {
            return Some(m);
        }
        if let Some(m) = self.modules.iter().find(|m| m.eq_ignore_ascii_case(query)) {
            return Some(m);
        }
        query
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| self.modules.get(i))
            .map(String::as_str)
    }
}

/// A course that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourse {
    /// Unique title
    pub title: String,
    /// One-line description
    pub description: String,
    /// Module names in order
    pub modules: Vec<String>,
}

/// The courses seeded into an empty database.
#[must_use]
pub fn builtin_courses() -> Vec<NewCourse> {
    BUILTIN_COURSES
        .iter()
        .map(|(title, topic, description)| NewCourse {
            title: (*title).to_string(),
            description: (*description).to_string(),
            modules: vec![
                format!("Symptoms of {topic}"),
                format!("How to cope with {topic}"),
                format!("How to overcome {topic}"),
            ],
        })
        .collect()
}

/// Completion as a whole percentage, rounded half away from zero.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn progress_percentage(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (completed.min(total) as f64 / total as f64 * 100.0).round();
    pct as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course() -> Course {
        Course {
            id: 1,
            title: "Depression Course".to_string(),
            description: String::new(),
            modules: vec![
                "Symptoms of Depression".to_string(),
                "How to cope with Depression".to_string(),
                "How to overcome Depression".to_string(),
            ],
        }
    }

    #[test]
    fn test_builtin_courses() {
        let courses = builtin_courses();
        assert_eq!(courses.len(), 6);
        assert!(courses.iter().all(|c| c.modules.len() == 3));
        assert_eq!(courses[2].modules[0], "Symptoms of OCD");
        assert_eq!(courses[5].modules[2], "How to overcome Panic Disorder");
    }

    #[test]
    fn test_progress_percentage() {
        assert_eq!(progress_percentage(0, 3), 0);
        assert_eq!(progress_percentage(1, 3), 33);
        assert_eq!(progress_percentage(2, 3), 67);
        assert_eq!(progress_percentage(3, 3), 100);
        assert_eq!(progress_percentage(0, 0), 0);
    }

    #[test]
    fn test_resolve_module() {
        let course = course();
        assert_eq!(course.resolve_module("2"), Some("How to cope with Depression"));
        assert_eq!(
            course.resolve_module("symptoms of depression"),
            Some("Symptoms of Depression")
        );
        assert_eq!(course.resolve_module("4"), None);
        assert_eq!(course.resolve_module("Sleep"), None);
        assert!(course.has_module("How to overcome Depression"));
    }
}
