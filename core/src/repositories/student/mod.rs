//! Student (credential store) repository trait.

use async_trait::async_trait;

use crate::domain::entities::{NewStudent, Student};
use crate::errors::DomainError;

/// Repository trait for Student persistence operations
///
/// This is the credential store: registration writes through `create`,
/// login and the authentication filter read through `find_by_email`.
/// Email lookups are exact matches against the stored value.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Find a student by email
    ///
    /// # Returns
    /// * `Ok(Some(Student))` - Student found
    /// * `Ok(None)` - No student with this exact email
    /// * `Err(DomainError)` - Storage error
    async fn find_by_email(&self, email: &str) -> Result<Option<Student>, DomainError>;

    /// Find a student by identifier
    async fn find_by_id(&self, id: i64) -> Result<Option<Student>, DomainError>;

    /// All students ordered by id
    async fn find_all(&self) -> Result<Vec<Student>, DomainError>;

    /// Persist a new student and return it with its assigned id
    ///
    /// # Returns
    /// * `Err(DomainError::Auth(AuthError::EmailAlreadyRegistered))` - The
    ///   email is taken; the store is left unchanged
    async fn create(&self, student: NewStudent) -> Result<Student, DomainError>;

    /// Replace the stored student with the same id
    async fn update(&self, student: Student) -> Result<Student, DomainError>;

    /// Delete a student together with its tasks and their subtasks
    ///
    /// # Returns
    /// * `Ok(true)` - Student was deleted
    /// * `Ok(false)` - Student not found
    async fn delete(&self, id: i64) -> Result<bool, DomainError>;

    /// Check whether a student with this exact email exists
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;
}
