use chrono::{DateTime, NaiveDateTime, Utc};
use notifier_core::{Priority, Status, Task, TaskInput};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /api/tasks` and `PUT /api/tasks/{id}`
///
/// `priority` and `status` are accepted in any letter case; `dueDate` is a
/// local date-time such as `2025-06-01T23:59:00`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaskRequest {
    #[validate(length(min = 1, max = 100, message = "Title is required (max 100 characters)"))]
    pub title: String,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    pub due_date: NaiveDateTime,

    pub priority: String,

    #[serde(default)]
    pub status: Option<String>,

    pub student_id: i64,
}

impl From<TaskRequest> for TaskInput {
    fn from(request: TaskRequest) -> Self {
        TaskInput {
            title: request.title,
            description: request.description,
            due_date: request.due_date,
            priority: request.priority,
            status: request.status,
            student_id: request.student_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub due_date: NaiveDateTime,
    pub priority: Priority,
    pub status: Status,
    pub student_id: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            due_date: task.due_date,
            priority: task.priority,
            status: task.status,
            student_id: task.student_id,
            created_at: task.created_at,
        }
    }
}
