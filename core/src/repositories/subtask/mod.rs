//! SubTask repository trait.

use async_trait::async_trait;

use crate::domain::entities::{NewSubTask, SubTask};
use crate::errors::DomainError;

#[async_trait]
pub trait SubTaskRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<SubTask>, DomainError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<SubTask>, DomainError>;

    /// Subtasks of a task, ordered by id
    async fn find_by_task(&self, task_id: i64) -> Result<Vec<SubTask>, DomainError>;

    async fn create(&self, subtask: NewSubTask) -> Result<SubTask, DomainError>;

    async fn update(&self, subtask: SubTask) -> Result<SubTask, DomainError>;

    async fn delete(&self, id: i64) -> Result<bool, DomainError>;
}
