//! Student entity: the identity that owns tasks and holds login credentials.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Student entity representing a registered student
///
/// `password_hash` is skipped during serialization so the entity can never
/// leak it through a response body or a log line rendered as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Database-assigned identifier
    pub id: i64,

    pub first_name: String,

    pub last_name: String,

    /// Unique login key, matched exactly as stored
    pub email: String,

    /// bcrypt hash of the password
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Timestamp when the student registered
    pub created_at: DateTime<Utc>,
}

impl Student {
    /// Full display name
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A student that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
}

impl NewStudent {
    /// Attach the store-assigned id and creation time
    pub fn into_student(self, id: i64, created_at: DateTime<Utc>) -> Student {
        Student {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            password_hash: self.password_hash,
            created_at,
        }
    }
}
