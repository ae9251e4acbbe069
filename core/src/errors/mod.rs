//! Domain-specific error types and error handling.

mod types;

pub use types::{AuthError, TokenError};

use thiserror::Error;

/// Core domain errors
///
/// A closed, tagged set: the API layer maps each variant to an HTTP status
/// with a single pure function.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("{resource} not found with id {id}")]
    NotFound { resource: &'static str, id: i64 },

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(resource: &'static str, id: i64) -> Self {
        DomainError::NotFound { resource, id }
    }

    pub fn database(message: impl Into<String>) -> Self {
        DomainError::Database {
            message: message.into(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let error = DomainError::not_found("Task", 42);
        assert_eq!(error.to_string(), "Task not found with id 42");
    }

    #[test]
    fn test_bridged_errors_are_transparent() {
        let error: DomainError = TokenError::Expired.into();
        assert_eq!(error.to_string(), "Token expired");

        let error: DomainError = AuthError::InvalidCredentials.into();
        assert!(matches!(error, DomainError::Auth(AuthError::InvalidCredentials)));
    }
}
