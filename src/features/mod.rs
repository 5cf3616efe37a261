//! Feature implementations for salutis.
//!
//! - Breathing exercises
//! - Courses and progress tracking
//! - Support chat
//! - Shell completions

pub mod breathing;
pub mod chat;
pub mod courses;
pub mod shell;
