//! Task management service

use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::domain::entities::{NewTask, Priority, Status, Task};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{StudentRepository, TaskRepository};
use crate::services::rules::{check_description, require_title};

/// Task fields as submitted by a client
///
/// `priority` and `status` are parsed case-insensitively. A missing status
/// means `PENDING` on create and "unchanged" on update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskInput {
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDateTime,
    pub priority: String,
    pub status: Option<String>,
    pub student_id: i64,
}

pub(crate) fn parse_status(value: Option<&str>) -> DomainResult<Option<Status>> {
    value
        .map(|v| v.parse::<Status>().map_err(DomainError::validation))
        .transpose()
}

pub struct TaskService {
    tasks: Arc<dyn TaskRepository>,
    students: Arc<dyn StudentRepository>,
}

impl TaskService {
    pub fn new(tasks: Arc<dyn TaskRepository>, students: Arc<dyn StudentRepository>) -> Self {
        Self { tasks, students }
    }

    pub async fn find_all(&self) -> DomainResult<Vec<Task>> {
        self.tasks.find_all().await
    }

    pub async fn find_by_id(&self, id: i64) -> DomainResult<Task> {
        self.tasks
            .find_by_id(id)
            .await?
            .ok_or(DomainError::not_found("Task", id))
    }

    /// Tasks of one student; `NotFound` if the student does not exist
    pub async fn find_by_student(&self, student_id: i64) -> DomainResult<Vec<Task>> {
        self.require_student(student_id).await?;
        self.tasks.find_by_student(student_id).await
    }

    pub async fn create(&self, input: TaskInput) -> DomainResult<Task> {
        let (priority, status) = Self::check(&input)?;
        self.require_student(input.student_id).await?;

        let task = self
            .tasks
            .create(NewTask {
                title: input.title.trim().to_string(),
                description: input.description,
                due_date: input.due_date,
                priority,
                status: status.unwrap_or_default(),
                student_id: input.student_id,
            })
            .await?;

        tracing::info!(task_id = task.id, student_id = task.student_id, "Task created");
        Ok(task)
    }

    /// Replace every field of a task, keeping its status when none is given
    pub async fn update(&self, id: i64, input: TaskInput) -> DomainResult<Task> {
        let (priority, status) = Self::check(&input)?;
        let mut task = self.find_by_id(id).await?;
        if task.student_id != input.student_id {
            self.require_student(input.student_id).await?;
        }

        task.title = input.title.trim().to_string();
        task.description = input.description;
        task.due_date = input.due_date;
        task.priority = priority;
        task.student_id = input.student_id;
        if let Some(status) = status {
            task.status = status;
        }

        let task = self.tasks.update(task).await?;
        tracing::info!(task_id = id, "Task updated");
        Ok(task)
    }

    /// Delete a task with its subtasks
    pub async fn delete(&self, id: i64) -> DomainResult<()> {
        if !self.tasks.delete(id).await? {
            return Err(DomainError::not_found("Task", id));
        }
        tracing::info!(task_id = id, "Task deleted");
        Ok(())
    }

    fn check(input: &TaskInput) -> DomainResult<(Priority, Option<Status>)> {
        require_title(&input.title)?;
        check_description(input.description.as_deref())?;
        let priority = input
            .priority
            .parse::<Priority>()
            .map_err(DomainError::validation)?;
        let status = parse_status(input.status.as_deref())?;
        Ok((priority, status))
    }

    async fn require_student(&self, student_id: i64) -> DomainResult<()> {
        match self.students.find_by_id(student_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found("Student", student_id)),
        }
    }
}
