//! Error types for list operations.

use todo_models::ValidationError;
use todo_persistence::PersistenceError;
use thiserror::Error;

/// Errors that can occur during list operations.
#[derive(Error, Debug)]
pub enum ListError {
    /// Input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Item not found.
    #[error("todo not found: {0}")]
    NotFound(String),

    /// Underlying store failed.
    #[error("store error: {0}")]
    Store(#[from] PersistenceError),
}

/// Result type alias for list operations.
pub type Result<T> = std::result::Result<T, ListError>;
