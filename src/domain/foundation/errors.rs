//! Error types for the domain layer.

use thiserror::Error;

/// Errors that occur while validating user-supplied values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("'{what}' is not ready yet, please wait a moment")]
    NotReady { what: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a not-ready error for a resource that is still loading.
    pub fn not_ready(what: impl Into<String>) -> Self {
        ValidationError::NotReady { what: what.into() }
    }

    /// Returns the offending field name, if the error is tied to one.
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::EmptyField { field } | ValidationError::InvalidFormat { field, .. } => {
                Some(field)
            }
            ValidationError::NotReady { .. } => None,
        }
    }
}
