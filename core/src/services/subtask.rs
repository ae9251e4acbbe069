//! SubTask management service

use std::sync::Arc;

use crate::domain::entities::{NewSubTask, SubTask};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{SubTaskRepository, TaskRepository};
use crate::services::rules::{check_description, require_title};
use crate::services::task::parse_status;

/// SubTask fields as submitted by a client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubTaskInput {
    pub title: String,
    pub description: Option<String>,
    pub status: Option<String>,
    pub task_id: i64,
}

pub struct SubTaskService {
    subtasks: Arc<dyn SubTaskRepository>,
    tasks: Arc<dyn TaskRepository>,
}

impl SubTaskService {
    pub fn new(subtasks: Arc<dyn SubTaskRepository>, tasks: Arc<dyn TaskRepository>) -> Self {
        Self { subtasks, tasks }
    }

    pub async fn find_all(&self) -> DomainResult<Vec<SubTask>> {
        self.subtasks.find_all().await
    }

    pub async fn find_by_id(&self, id: i64) -> DomainResult<SubTask> {
        self.subtasks
            .find_by_id(id)
            .await?
            .ok_or(DomainError::not_found("SubTask", id))
    }

    /// Subtasks of one task; `NotFound` if the task does not exist
    pub async fn find_by_task(&self, task_id: i64) -> DomainResult<Vec<SubTask>> {
        self.require_task(task_id).await?;
        self.subtasks.find_by_task(task_id).await
    }

    pub async fn create(&self, input: SubTaskInput) -> DomainResult<SubTask> {
        require_title(&input.title)?;
        check_description(input.description.as_deref())?;
        let status = parse_status(input.status.as_deref())?;
        self.require_task(input.task_id).await?;

        let subtask = self
            .subtasks
            .create(NewSubTask {
                title: input.title.trim().to_string(),
                description: input.description,
                status: status.unwrap_or_default(),
                task_id: input.task_id,
            })
            .await?;

        tracing::info!(subtask_id = subtask.id, task_id = subtask.task_id, "SubTask created");
        Ok(subtask)
    }

    pub async fn update(&self, id: i64, input: SubTaskInput) -> DomainResult<SubTask> {
        require_title(&input.title)?;
        check_description(input.description.as_deref())?;
        let status = parse_status(input.status.as_deref())?;

        let mut subtask = self.find_by_id(id).await?;
        if subtask.task_id != input.task_id {
            self.require_task(input.task_id).await?;
        }

        subtask.title = input.title.trim().to_string();
        subtask.description = input.description;
        subtask.task_id = input.task_id;
        if let Some(status) = status {
            subtask.status = status;
        }

        let subtask = self.subtasks.update(subtask).await?;
        tracing::info!(subtask_id = id, "SubTask updated");
        Ok(subtask)
    }

    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        if !self.subtasks.delete(id).await? {
            return Err(DomainError::not_found("SubTask", id));
        }
        tracing::info!(subtask_id = id, "SubTask deleted");
        Ok(())
    }

    async fn require_task(&self, task_id: i64) -> DomainResult<()> {
        match self.tasks.find_by_id(task_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found("Task", task_id)),
        }
    }
}
