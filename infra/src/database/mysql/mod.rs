//! MySQL-specific database implementations
//!
//! This module contains MySQL implementations of repository traits
//! using SQLx for database operations.

pub mod student_repository_impl;
pub mod subtask_repository_impl;
pub mod task_repository_impl;

use notifier_core::errors::DomainError;

// Re-export the MySQL implementations
pub use student_repository_impl::MySqlStudentRepository;
pub use subtask_repository_impl::MySqlSubTaskRepository;
pub use task_repository_impl::MySqlTaskRepository;

/// Log a failed statement and turn it into a domain error
///
/// The driver message stays in the log; callers only see the context.
pub(crate) fn query_failed(context: &str, error: sqlx::Error) -> DomainError {
    tracing::error!(error = %error, "{}", context);
    DomainError::Database {
        message: context.to_string(),
    }
}

/// Error for a column that could not be read or parsed
pub(crate) fn bad_column(column: &str, error: impl std::fmt::Display) -> DomainError {
    DomainError::Database {
        message: format!("Failed to read column {}: {}", column, error),
    }
}

/// Whether the error is a duplicate key on a unique index
pub(crate) fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// Whether the error is a missing parent row for a foreign key
pub(crate) fn is_foreign_key_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}
