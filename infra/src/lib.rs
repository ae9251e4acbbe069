//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the notifier backend.
//! It provides the MySQL implementations of the repository traits defined in
//! `notifier_core`, plus connection pooling and schema setup.
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)

use notifier_core::errors::DomainError;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Schema setup error
    #[error("Migration error: {0}")]
    Migration(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        DomainError::Database {
            message: error.to_string(),
        }
    }
}
