//! Error types for tempmail.

use thiserror::Error;

/// Common error type for tempmail.
#[derive(Error, Debug)]
pub enum TempMailError {
    /// Database error.
    ///
    /// Wraps errors from whichever sqlx backend the crate was built with.
    #[error("database error: {0}")]
    Database(String),

    /// Database connection error.
    #[error("database connection error: {0}")]
    DatabaseConnection(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested domain is not in the allow-list.
    #[error("domain not allowed: {0}")]
    DomainNotAllowed(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for TempMailError {
    fn from(e: sqlx::Error) -> Self {
        TempMailError::Database(e.to_string())
    }
}

/// Result type alias for tempmail operations.
pub type Result<T> = std::result::Result<T, TempMailError>;
