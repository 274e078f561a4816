//! Error types for the domain layer.

use thiserror::Error;

/// Errors raised by domain aggregates and value objects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Invalid state transition: {0}")]
    InvalidTransition(String),

    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: &'static str },
}

impl DomainError {
    /// Creates an invalid transition error.
    pub fn invalid_transition(from: impl std::fmt::Debug, to: impl std::fmt::Debug) -> Self {
        DomainError::InvalidTransition(format!(
            "Cannot transition from {:?} to {:?}",
            from, to
        ))
    }

    /// Creates an empty field error.
    pub fn empty_field(field: &'static str) -> Self {
        DomainError::EmptyField { field }
    }
}
