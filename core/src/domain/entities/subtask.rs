//! SubTask entity: a checklist item belonging to a task.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::task::Status;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubTask {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: Status,
    pub task_id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubTask {
    pub title: String,
    pub description: Option<String>,
    pub status: Status,
    pub task_id: i64,
}

impl NewSubTask {
    pub fn into_subtask(self, id: i64, created_at: DateTime<Utc>) -> SubTask {
        SubTask {
            id,
            title: self.title,
            description: self.description,
            status: self.status,
            task_id: self.task_id,
            created_at,
        }
    }
}
