//! Validation errors for item input.

use thiserror::Error;

/// Input failed a shape, type or length constraint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was not supplied.
    #[error("\"{0}\" is required")]
    Missing(&'static str),

    /// A field was supplied with the wrong JSON type.
    #[error("\"{field}\" must be a {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    /// Text shorter than the lower bound.
    #[error("\"{field}\" length must be at least {min} characters long")]
    TooShort { field: &'static str, min: usize },

    /// Text longer than the upper bound.
    #[error("\"{field}\" length must be less than or equal to {max} characters long")]
    TooLong { field: &'static str, max: usize },

    /// Appending would need an order above `i64::MAX`.
    #[error("no order is left above {0}; move that todo lower first")]
    NoOrderAbove(i64),
}

/// Result type alias for validation.
pub type Result<T> = std::result::Result<T, ValidationError>;
