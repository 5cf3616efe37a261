//! Mental health courses and per-user progress.
//!
//! - Built-in course catalog, seeded into an empty database
//! - Enrollment, one per user and course
//! - Module completion with an overall completion flag

pub mod catalog;
pub mod enrollment;
pub mod storage;

pub use catalog::{builtin_courses, progress_percentage, Course, NewCourse};
pub use enrollment::{CourseProgress, EnrolledCourse, Enrollment, SeedOutcome};
pub use storage::CourseStorage;
