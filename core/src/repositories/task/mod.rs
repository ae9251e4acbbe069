//! Task repository trait.

use async_trait::async_trait;

use crate::domain::entities::{NewTask, Task};
use crate::errors::DomainError;

#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Task>, DomainError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Task>, DomainError>;

    /// Tasks owned by a student, ordered by due date
    async fn find_by_student(&self, student_id: i64) -> Result<Vec<Task>, DomainError>;

    async fn create(&self, task: NewTask) -> Result<Task, DomainError>;

    async fn update(&self, task: Task) -> Result<Task, DomainError>;

    /// Delete a task and its subtasks; `Ok(false)` if it did not exist
    async fn delete(&self, id: i64) -> Result<bool, DomainError>;
}
