//! MySQL implementation of the StudentRepository trait.
//!
//! The `students.email` column uses a binary collation, so lookups are exact
//! and case-sensitive, and its unique index backs the duplicate-email check.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use notifier_core::domain::entities::{NewStudent, Student};
use notifier_core::errors::{AuthError, DomainError};
use notifier_core::repositories::StudentRepository;

use super::{bad_column, is_unique_violation, query_failed};

const STUDENT_COLUMNS: &str = "id, first_name, last_name, email, password_hash, created_at";

/// MySQL implementation of StudentRepository
pub struct MySqlStudentRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlStudentRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Student entity
    fn row_to_student(row: &sqlx::mysql::MySqlRow) -> Result<Student, DomainError> {
        Ok(Student {
            id: row.try_get("id").map_err(|e| bad_column("id", e))?,
            first_name: row
                .try_get("first_name")
                .map_err(|e| bad_column("first_name", e))?,
            last_name: row
                .try_get("last_name")
                .map_err(|e| bad_column("last_name", e))?,
            email: row.try_get("email").map_err(|e| bad_column("email", e))?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| bad_column("password_hash", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| bad_column("created_at", e))?,
        })
    }
}

#[async_trait]
impl StudentRepository for MySqlStudentRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Student>, DomainError> {
        let query = format!("SELECT {} FROM students WHERE email = ? LIMIT 1", STUDENT_COLUMNS);

        let row = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to find student by email", e))?;

        row.as_ref().map(Self::row_to_student).transpose()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Student>, DomainError> {
        let query = format!("SELECT {} FROM students WHERE id = ? LIMIT 1", STUDENT_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to find student by id", e))?;

        row.as_ref().map(Self::row_to_student).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Student>, DomainError> {
        let query = format!("SELECT {} FROM students ORDER BY id", STUDENT_COLUMNS);

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to list students", e))?;

        rows.iter().map(Self::row_to_student).collect()
    }

    async fn create(&self, student: NewStudent) -> Result<Student, DomainError> {
        let created_at = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO students (first_name, last_name, email, password_hash, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&student.first_name)
        .bind(&student.last_name)
        .bind(&student.email)
        .bind(&student.password_hash)
        .bind(created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => {
                let id = done.last_insert_id() as i64;
                Ok(student.into_student(id, created_at))
            }
            Err(e) if is_unique_violation(&e) => Err(AuthError::EmailAlreadyRegistered {
                email: student.email,
            }
            .into()),
            Err(e) => Err(query_failed("Failed to create student", e)),
        }
    }

    async fn update(&self, student: Student) -> Result<Student, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE students
            SET first_name = ?, last_name = ?, email = ?, password_hash = ?
            WHERE id = ?
            "#,
        )
        .bind(&student.first_name)
        .bind(&student.last_name)
        .bind(&student.email)
        .bind(&student.password_hash)
        .bind(student.id)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {
                // MySQL reports zero affected rows for an unchanged row, so
                // existence is checked separately
                self.find_by_id(student.id)
                    .await?
                    .ok_or(DomainError::not_found("Student", student.id))
            }
            Err(e) if is_unique_violation(&e) => Err(AuthError::EmailAlreadyRegistered {
                email: student.email,
            }
            .into()),
            Err(e) => Err(query_failed("Failed to update student", e)),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        // Tasks and subtasks go with it through ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM students WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to delete student", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM students WHERE email = ?) AS found")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to check email", e))?;

        let found: i64 = row.try_get("found").map_err(|e| bad_column("found", e))?;
        Ok(found == 1)
    }
}
