//! Error types for the Workout Buddy application

use thiserror::Error;

/// Errors raised while normalizing values that cross the API boundary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("user_id cannot be empty")]
    EmptyUserId,

    #[error("user_id must be a string or an integer")]
    InvalidUserId,

    #[error("{field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

/// Service layer error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Data store error: {0}")]
    Store(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("External service error: {0}")]
    External(String),
}
