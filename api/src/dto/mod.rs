//! Request and response bodies
//!
//! Field names are camelCase on the wire.

pub mod auth;
pub mod error;
pub mod student;
pub mod subtask;
pub mod task;

pub use auth::{AuthResponse, LoginRequest, RegisterRequest};
pub use error::{ErrorResponse, ErrorResponseExt};
pub use student::{StudentResponse, UpdateStudentRequest};
pub use subtask::{SubTaskRequest, SubTaskResponse};
pub use task::{TaskRequest, TaskResponse};
