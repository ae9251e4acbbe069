//! Student management service

use std::sync::Arc;

use crate::domain::entities::Student;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::StudentRepository;
use crate::services::rules::{require_email, require_name};

/// Profile fields a student may change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentUpdate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

pub struct StudentService {
    students: Arc<dyn StudentRepository>,
}

impl StudentService {
    pub fn new(students: Arc<dyn StudentRepository>) -> Self {
        Self { students }
    }

    pub async fn find_all(&self) -> DomainResult<Vec<Student>> {
        self.students.find_all().await
    }

    pub async fn find_by_id(&self, id: i64) -> DomainResult<Student> {
        self.students
            .find_by_id(id)
            .await?
            .ok_or(DomainError::not_found("Student", id))
    }

    /// Update a student's profile
    ///
    /// Changing the email to one held by another student is a conflict.
    /// Tokens issued for the old email stop authenticating.
    pub async fn update(&self, id: i64, update: StudentUpdate) -> DomainResult<Student> {
        require_name("First name", &update.first_name)?;
        require_name("Last name", &update.last_name)?;
        require_email(&update.email)?;

        let mut student = self.find_by_id(id).await?;

        if update.email != student.email {
            if let Some(holder) = self.students.find_by_email(&update.email).await? {
                if holder.id != id {
                    return Err(AuthError::EmailAlreadyRegistered {
                        email: update.email,
                    }
                    .into());
                }
            }
        }

        student.first_name = update.first_name.trim().to_string();
        student.last_name = update.last_name.trim().to_string();
        student.email = update.email;

        let student = self.students.update(student).await?;
        tracing::info!(student_id = id, "Student updated");
        Ok(student)
    }

    /// Delete a student with all of its tasks
    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        if !self.students.delete(id).await? {
            return Err(DomainError::not_found("Student", id));
        }
        tracing::info!(student_id = id, "Student deleted");
        Ok(())
    }
}
