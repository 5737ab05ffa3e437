//! # Feedback Errors

use thiserror::Error;

/// Result type for request validation and store lookups
pub type FeedbackResult<T> = Result<T, FeedbackError>;

/// Result type for backend I/O
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Client-visible feedback errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedbackError {
    #[error("Invalid JSON in request body")]
    MalformedBody(String),

    #[error("Missing required fields: rating and comment are required")]
    MissingField,

    #[error("Rating must be a number between 1 and 5")]
    InvalidRating,

    #[error("ID parameter is required for DELETE operation")]
    MissingId,

    /// Carries the parsed id, or the raw text when it has no leading digits
    #[error("Feedback with ID {0} not found")]
    NotFound(String),
}

impl FeedbackError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            FeedbackError::MalformedBody(_) => 400,
            FeedbackError::MissingField => 400,
            FeedbackError::InvalidRating => 400,
            FeedbackError::MissingId => 400,
            FeedbackError::NotFound(_) => 404,
        }
    }

    /// Parser detail for malformed bodies
    pub fn details(&self) -> Option<&str> {
        match self {
            FeedbackError::MalformedBody(details) => Some(details.as_str()),
            _ => None,
        }
    }
}

/// Backing file errors. These are logged, never returned to clients.
#[derive(Debug, Clone, Error)]
pub enum PersistenceError {
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    #[error("Invalid feedback data in {path}: {message}")]
    Json { path: String, message: String },
}
