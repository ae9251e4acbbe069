//! MySQL implementation of the TaskRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{MySqlPool, Row};

use notifier_core::domain::entities::{NewTask, Priority, Status, Task};
use notifier_core::errors::DomainError;
use notifier_core::repositories::TaskRepository;

use super::{bad_column, is_foreign_key_violation, query_failed};

const TASK_COLUMNS: &str =
    "id, title, description, due_date, priority, status, student_id, created_at";

/// MySQL implementation of TaskRepository
pub struct MySqlTaskRepository {
    pool: MySqlPool,
}

impl MySqlTaskRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_task(row: &sqlx::mysql::MySqlRow) -> Result<Task, DomainError> {
        let priority: String = row.try_get("priority").map_err(|e| bad_column("priority", e))?;
        let status: String = row.try_get("status").map_err(|e| bad_column("status", e))?;

        Ok(Task {
            id: row.try_get("id").map_err(|e| bad_column("id", e))?,
            title: row.try_get("title").map_err(|e| bad_column("title", e))?,
            description: row
                .try_get("description")
                .map_err(|e| bad_column("description", e))?,
            due_date: row
                .try_get::<NaiveDateTime, _>("due_date")
                .map_err(|e| bad_column("due_date", e))?,
            priority: priority
                .parse::<Priority>()
                .map_err(|e| bad_column("priority", e))?,
            status: status.parse::<Status>().map_err(|e| bad_column("status", e))?,
            student_id: row
                .try_get("student_id")
                .map_err(|e| bad_column("student_id", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| bad_column("created_at", e))?,
        })
    }

    async fn fetch_many(&self, query: &str, bind: Option<i64>, context: &str) -> Result<Vec<Task>, DomainError> {
        let mut statement = sqlx::query(query);
        if let Some(value) = bind {
            statement = statement.bind(value);
        }

        let rows = statement
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_failed(context, e))?;

        rows.iter().map(Self::row_to_task).collect()
    }
}

#[async_trait]
impl TaskRepository for MySqlTaskRepository {
    async fn find_all(&self) -> Result<Vec<Task>, DomainError> {
        let query = format!("SELECT {} FROM tasks ORDER BY id", TASK_COLUMNS);
        self.fetch_many(&query, None, "Failed to list tasks").await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Task>, DomainError> {
        let query = format!("SELECT {} FROM tasks WHERE id = ? LIMIT 1", TASK_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to find task by id", e))?;

        row.as_ref().map(Self::row_to_task).transpose()
    }

    async fn find_by_student(&self, student_id: i64) -> Result<Vec<Task>, DomainError> {
        let query = format!(
            "SELECT {} FROM tasks WHERE student_id = ? ORDER BY due_date, id",
            TASK_COLUMNS
        );
        self.fetch_many(&query, Some(student_id), "Failed to list tasks of student")
            .await
    }

    async fn create(&self, task: NewTask) -> Result<Task, DomainError> {
        let created_at = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO tasks (title, description, due_date, priority, status, student_id, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.due_date)
        .bind(task.priority.as_str())
        .bind(task.status.as_str())
        .bind(task.student_id)
        .bind(created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => {
                let id = done.last_insert_id() as i64;
                Ok(task.into_task(id, created_at))
            }
            Err(e) if is_foreign_key_violation(&e) => {
                Err(DomainError::not_found("Student", task.student_id))
            }
            Err(e) => Err(query_failed("Failed to create task", e)),
        }
    }

    async fn update(&self, task: Task) -> Result<Task, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET title = ?, description = ?, due_date = ?, priority = ?, status = ?, student_id = ?
            WHERE id = ?
            "#,
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.due_date)
        .bind(task.priority.as_str())
        .bind(task.status.as_str())
        .bind(task.student_id)
        .bind(task.id)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => self
                .find_by_id(task.id)
                .await?
                .ok_or(DomainError::not_found("Task", task.id)),
            Err(e) if is_foreign_key_violation(&e) => {
                Err(DomainError::not_found("Student", task.student_id))
            }
            Err(e) => Err(query_failed("Failed to update task", e)),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to delete task", e))?;

        Ok(result.rows_affected() > 0)
    }
}
