//! Error types for salutis.

use thiserror::Error;

/// Errors that can occur while running salutis.
#[derive(Debug, Error)]
pub enum SalutisError {
    /// Configuration could not be loaded, saved or applied.
    #[error("configuration error: {0}")]
    Config(String),

    /// A SQLite operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// The requested item does not exist (or is not visible to this user).
    #[error("not found: {0}")]
    NotFound(String),

    /// The user already has an enrollment for this course.
    #[error("{0}")]
    AlreadyEnrolled(String),

    /// No user identity could be determined.
    #[error("not authenticated: set `general.user` in the config or the USER environment variable")]
    NotAuthenticated,

    /// User input was rejected.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The chat endpoint could not be reached or answered badly.
    #[error("chat error: {0}")]
    Chat(String),

    /// The terminal could not be set up or drawn.
    #[error("terminal error: {0}")]
    Terminal(String),

    /// Filesystem or stream I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failed.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl SalutisError {
    /// Whether this error is caused by the user rather than the environment.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_)
                | Self::AlreadyEnrolled(_)
                | Self::NotAuthenticated
                | Self::InvalidInput(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_enrolled_message_is_verbatim() {
        let err = SalutisError::AlreadyEnrolled("Already enrolled in this course".to_string());
        assert_eq!(err.to_string(), "Already enrolled in this course");
    }

    #[test]
    fn test_user_errors() {
        assert!(SalutisError::NotAuthenticated.is_user_error());
        assert!(SalutisError::InvalidInput("x".to_string()).is_user_error());
        assert!(!SalutisError::Database("x".to_string()).is_user_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: SalutisError = io.into();
        assert!(matches!(err, SalutisError::Io(_)));
    }
}
