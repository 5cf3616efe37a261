//! Course and enrollment storage.
//!
//! Persists the course catalog and per-user progress to the local database.

use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row};
use tracing::{debug, info};

use super::catalog::{builtin_courses, Course, NewCourse};
use super::enrollment::{CourseProgress, EnrolledCourse, Enrollment, SeedOutcome};
use crate::error::SalutisError;
use crate::storage::Database;

/// Message for a missing or foreign enrollment.
const ACCESS_DENIED: &str = "Course not found or access denied";

/// Storage for courses and enrollments.
pub struct CourseStorage {
    db: Database,
}

impl CourseStorage {
    /// Open storage at the default database location.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn new() -> Result<Self, SalutisError> {
        let db = Database::open()?;
        Ok(Self { db })
    }

    /// Create storage with an existing database connection.
    #[must_use]
    pub const fn with_database(db: Database) -> Self {
        Self { db }
    }

    /// Whether the course table is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn needs_initialization(&self) -> Result<bool, SalutisError> {
        Ok(self.course_count()? == 0)
    }

    fn course_count(&self) -> Result<usize, SalutisError> {
        let count: i64 = self
            .db
            .connection()
            .query_row("SELECT COUNT(*) FROM courses", [], |row| row.get(0))
            .map_err(|e| SalutisError::Database(format!("Failed to count courses: {e}")))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    /// Seed the built-in courses if the table is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails; nothing is inserted in that case.
    pub fn ensure_courses_exist(&self) -> Result<SeedOutcome, SalutisError> {
        let existing = self.course_count()?;
        if existing > 0 {
            return Ok(SeedOutcome {
                message: "Courses already exist".to_string(),
                count: existing,
                course_ids: Vec::new(),
            });
        }

        let course_ids = self.insert_courses(&builtin_courses())?;
        info!(count = course_ids.len(), "seeded course catalog");

        Ok(SeedOutcome {
            message: "Courses initialized successfully".to_string(),
            count: course_ids.len(),
            course_ids,
        })
    }

    /// Insert courses in one transaction.
    fn insert_courses(&self, courses: &[NewCourse]) -> Result<Vec<i64>, SalutisError> {
        let tx = self
            .db
            .connection()
            .unchecked_transaction()
            .map_err(|e| SalutisError::Database(format!("Failed to begin transaction: {e}")))?;

        let mut ids = Vec::with_capacity(courses.len());
        for course in courses {
            let modules = serde_json::to_string(&course.modules)?;
            tx.execute(
                "INSERT INTO courses (title, description, modules) VALUES (?1, ?2, ?3)",
                params![course.title, course.description, modules],
            )
            .map_err(|e| {
                SalutisError::Database(format!("Failed to insert course '{}': {e}", course.title))
            })?;
            ids.push(tx.last_insert_rowid());
        }

        tx.commit()
            .map_err(|e| SalutisError::Database(format!("Failed to commit courses: {e}")))?;
        Ok(ids)
    }

    /// All courses in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_courses(&self) -> Result<Vec<Course>, SalutisError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare("SELECT id, title, description, modules FROM courses ORDER BY id")
            .map_err(|e| SalutisError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([], row_to_course)
            .map_err(|e| SalutisError::Database(format!("Failed to query courses: {e}")))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| SalutisError::Database(e.to_string()))
    }

    /// Get a course by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_course(&self, id: i64) -> Result<Option<Course>, SalutisError> {
        self.db
            .connection()
            .query_row(
                "SELECT id, title, description, modules FROM courses WHERE id = ?1",
                [id],
                row_to_course,
            )
            .optional()
            .map_err(|e| SalutisError::Database(format!("Failed to query course: {e}")))
    }

    /// Resolve user input to a course: numeric ID, exact title, or a unique
    /// case-insensitive title prefix (then substring, so `ocd` works).
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when nothing matches and `InvalidInput` when the
    /// prefix is ambiguous.
    pub fn find_course(&self, query: &str) -> Result<Course, SalutisError> {
        let query = query.trim();
        if let Ok(id) = query.parse::<i64>() {
            return self
                .get_course(id)?
                .ok_or_else(|| SalutisError::NotFound(format!("No course with id {id}")));
        }

        let courses = self.get_courses()?;
        if let Some(course) = courses.iter().find(|c| c.title.eq_ignore_ascii_case(query)) {
            return Ok(course.clone());
        }

        let lower = query.to_lowercase();
        let mut matches: Vec<&Course> = courses
            .iter()
            .filter(|c| c.title.to_lowercase().starts_with(&lower))
            .collect();
        if matches.is_empty() {
            matches = courses
                .iter()
                .filter(|c| c.title.to_lowercase().contains(&lower))
                .collect();
        }

        match matches.len() {
            1 => Ok(matches[0].clone()),
            0 => Err(SalutisError::NotFound(format!("No course matches '{query}'"))),
            _ => Err(SalutisError::InvalidInput(format!(
                "'{query}' matches several courses: {}",
                matches
                    .iter()
                    .map(|c| c.title.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
        }
    }

    /// The user's enrollments with course details.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_user_courses(&self, user_id: &str) -> Result<Vec<EnrolledCourse>, SalutisError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare(
                r"SELECT id, user_id, course_id, started_at, completed_modules, is_completed
                  FROM user_courses
                  WHERE user_id = ?1
                  ORDER BY started_at, id",
            )
            .map_err(|e| SalutisError::Database(format!("Failed to prepare query: {e}")))?;

        let enrollments = stmt
            .query_map([user_id], row_to_enrollment)
            .map_err(|e| SalutisError::Database(format!("Failed to query enrollments: {e}")))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| SalutisError::Database(e.to_string()))?;

        enrollments
            .into_iter()
            .map(|enrollment| {
                let course = self.get_course(enrollment.course_id)?;
                Ok(EnrolledCourse { enrollment, course })
            })
            .collect()
    }

    /// Every course paired with the user's enrollment in it.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn course_overview(&self, user_id: &str) -> Result<Vec<CourseProgress>, SalutisError> {
        let mut enrollments = self.get_user_courses(user_id)?;
        Ok(self
            .get_courses()?
            .into_iter()
            .map(|course| {
                let enrollment = enrollments
                    .iter()
                    .position(|e| e.enrollment.course_id == course.id)
                    .map(|i| enrollments.swap_remove(i).enrollment);
                CourseProgress::new(course, enrollment)
            })
            .collect())
    }

    /// The user's enrollment for a course, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_enrollment(
        &self,
        user_id: &str,
        course_id: i64,
    ) -> Result<Option<Enrollment>, SalutisError> {
        self.db
            .connection()
            .query_row(
                r"SELECT id, user_id, course_id, started_at, completed_modules, is_completed
                  FROM user_courses
                  WHERE user_id = ?1 AND course_id = ?2",
                params![user_id, course_id],
                row_to_enrollment,
            )
            .optional()
            .map_err(|e| SalutisError::Database(format!("Failed to query enrollment: {e}")))
    }

    fn get_enrollment_by_id(&self, id: i64) -> Result<Option<Enrollment>, SalutisError> {
        self.db
            .connection()
            .query_row(
                r"SELECT id, user_id, course_id, started_at, completed_modules, is_completed
                  FROM user_courses WHERE id = ?1",
                [id],
                row_to_enrollment,
            )
            .optional()
            .map_err(|e| SalutisError::Database(format!("Failed to query enrollment: {e}")))
    }

    /// Enroll the user in a course.
    ///
    /// Returns the new enrollment ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the course does not exist and `AlreadyEnrolled`
    /// if the user already started it.
    pub fn start_course(&self, user_id: &str, course_id: i64) -> Result<i64, SalutisError> {
        if self.get_course(course_id)?.is_none() {
            return Err(SalutisError::NotFound(format!("No course with id {course_id}")));
        }

        if self.get_enrollment(user_id, course_id)?.is_some() {
            return Err(SalutisError::AlreadyEnrolled(
                "Already enrolled in this course".to_string(),
            ));
        }

        let conn = self.db.connection();
        conn.execute(
            r"INSERT INTO user_courses (user_id, course_id, started_at, completed_modules, is_completed)
              VALUES (?1, ?2, ?3, '[]', 0)",
            params![user_id, course_id, Utc::now().to_rfc3339()],
        )
        .map_err(|e| SalutisError::Database(format!("Failed to insert enrollment: {e}")))?;

        let id = conn.last_insert_rowid();
        info!(user = user_id, course_id, enrollment = id, "course started");
        Ok(id)
    }

    /// Mark a module of an enrollment as completed.
    ///
    /// Completing an already-completed module changes nothing. Returns the
    /// enrollment as stored afterwards.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the enrollment does not exist or belongs to
    /// another user, and `InvalidInput` if the module is not part of the
    /// course.
    pub fn complete_module(
        &self,
        user_id: &str,
        enrollment_id: i64,
        module: &str,
    ) -> Result<Enrollment, SalutisError> {
        let mut enrollment = self
            .get_enrollment_by_id(enrollment_id)?
            .filter(|e| e.user_id == user_id)
            .ok_or_else(|| SalutisError::NotFound(ACCESS_DENIED.to_string()))?;

        let course = self.get_course(enrollment.course_id)?;
        if let Some(ref course) = course {
            if !course.has_module(module) {
                return Err(SalutisError::InvalidInput(format!(
                    "'{module}' is not a module of {}",
                    course.title
                )));
            }
        }

        if enrollment.has_completed(module) {
            debug!(enrollment = enrollment_id, module, "module already completed");
            return Ok(enrollment);
        }

        enrollment.completed_modules.push(module.to_string());
        enrollment.is_completed = course
            .as_ref()
            .is_some_and(|c| enrollment.completed_modules.len() == c.modules.len());

        self.db
            .connection()
            .execute(
                "UPDATE user_courses SET completed_modules = ?1, is_completed = ?2 WHERE id = ?3",
                params![
                    serde_json::to_string(&enrollment.completed_modules)?,
                    enrollment.is_completed,
                    enrollment_id,
                ],
            )
            .map_err(|e| SalutisError::Database(format!("Failed to update enrollment: {e}")))?;

        info!(
            user = user_id,
            enrollment = enrollment_id,
            module,
            completed = enrollment.is_completed,
            "module completed"
        );
        Ok(enrollment)
    }
}

fn json_column(row: &Row<'_>, idx: usize) -> Result<Vec<String>, rusqlite::Error> {
    let raw: String = row.get(idx)?;
    serde_json::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Convert a database row to a Course.
fn row_to_course(row: &Row<'_>) -> Result<Course, rusqlite::Error> {
    Ok(Course {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        modules: json_column(row, 3)?,
    })
}

/// Convert a database row to an Enrollment.
fn row_to_enrollment(row: &Row<'_>) -> Result<Enrollment, rusqlite::Error> {
    let started_at_str: String = row.get(3)?;
    let started_at = DateTime::parse_from_rfc3339(&started_at_str)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;

    Ok(Enrollment {
        id: row.get(0)?,
        user_id: row.get(1)?,
        course_id: row.get(2)?,
        started_at,
        completed_modules: json_column(row, 4)?,
        is_completed: row.get(5)?,
    })
}
