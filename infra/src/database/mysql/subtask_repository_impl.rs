//! MySQL implementation of the SubTaskRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use notifier_core::domain::entities::{NewSubTask, Status, SubTask};
use notifier_core::errors::DomainError;
use notifier_core::repositories::SubTaskRepository;

use super::{bad_column, is_foreign_key_violation, query_failed};

const SUBTASK_COLUMNS: &str = "id, title, description, status, task_id, created_at";

/// MySQL implementation of SubTaskRepository
pub struct MySqlSubTaskRepository {
    pool: MySqlPool,
}

impl MySqlSubTaskRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_subtask(row: &sqlx::mysql::MySqlRow) -> Result<SubTask, DomainError> {
        let status: String = row.try_get("status").map_err(|e| bad_column("status", e))?;

        Ok(SubTask {
            id: row.try_get("id").map_err(|e| bad_column("id", e))?,
            title: row.try_get("title").map_err(|e| bad_column("title", e))?,
            description: row
                .try_get("description")
                .map_err(|e| bad_column("description", e))?,
            status: status.parse::<Status>().map_err(|e| bad_column("status", e))?,
            task_id: row.try_get("task_id").map_err(|e| bad_column("task_id", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| bad_column("created_at", e))?,
        })
    }
}

#[async_trait]
impl SubTaskRepository for MySqlSubTaskRepository {
    async fn find_all(&self) -> Result<Vec<SubTask>, DomainError> {
        let query = format!("SELECT {} FROM subtasks ORDER BY id", SUBTASK_COLUMNS);

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to list subtasks", e))?;

        rows.iter().map(Self::row_to_subtask).collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<SubTask>, DomainError> {
        let query = format!("SELECT {} FROM subtasks WHERE id = ? LIMIT 1", SUBTASK_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to find subtask by id", e))?;

        row.as_ref().map(Self::row_to_subtask).transpose()
    }

    async fn find_by_task(&self, task_id: i64) -> Result<Vec<SubTask>, DomainError> {
        let query = format!(
            "SELECT {} FROM subtasks WHERE task_id = ? ORDER BY id",
            SUBTASK_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(task_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to list subtasks of task", e))?;

        rows.iter().map(Self::row_to_subtask).collect()
    }

    async fn create(&self, subtask: NewSubTask) -> Result<SubTask, DomainError> {
        let created_at = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO subtasks (title, description, status, task_id, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&subtask.title)
        .bind(&subtask.description)
        .bind(subtask.status.as_str())
        .bind(subtask.task_id)
        .bind(created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => {
                let id = done.last_insert_id() as i64;
                Ok(subtask.into_subtask(id, created_at))
            }
            Err(e) if is_foreign_key_violation(&e) => {
                Err(DomainError::not_found("Task", subtask.task_id))
            }
            Err(e) => Err(query_failed("Failed to create subtask", e)),
        }
    }

    async fn update(&self, subtask: SubTask) -> Result<SubTask, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE subtasks
            SET title = ?, description = ?, status = ?, task_id = ?
            WHERE id = ?
            "#,
        )
        .bind(&subtask.title)
        .bind(&subtask.description)
        .bind(subtask.status.as_str())
        .bind(subtask.task_id)
        .bind(subtask.id)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => self
                .find_by_id(subtask.id)
                .await?
                .ok_or(DomainError::not_found("SubTask", subtask.id)),
            Err(e) if is_foreign_key_violation(&e) => {
                Err(DomainError::not_found("Task", subtask.task_id))
            }
            Err(e) => Err(query_failed("Failed to update subtask", e)),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM subtasks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| query_failed("Failed to delete subtask", e))?;

        Ok(result.rows_affected() > 0)
    }
}
