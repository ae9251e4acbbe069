use chrono::{DateTime, Utc};
use notifier_core::{Status, SubTask, SubTaskInput};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubTaskRequest {
    #[validate(length(min = 1, max = 100, message = "Title is required (max 100 characters)"))]
    pub title: String,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    pub task_id: i64,
}

impl From<SubTaskRequest> for SubTaskInput {
    fn from(request: SubTaskRequest) -> Self {
        SubTaskInput {
            title: request.title,
            description: request.description,
            status: request.status,
            task_id: request.task_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubTaskResponse {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: Status,
    pub task_id: i64,
    pub created_at: DateTime<Utc>,
}

impl From<SubTask> for SubTaskResponse {
    fn from(subtask: SubTask) -> Self {
        Self {
            id: subtask.id,
            title: subtask.title,
            description: subtask.description,
            status: subtask.status,
            task_id: subtask.task_id,
            created_at: subtask.created_at,
        }
    }
}
