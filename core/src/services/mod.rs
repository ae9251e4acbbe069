//! Business services containing domain logic and use cases.

pub mod auth;
pub mod rules;
pub mod student;
pub mod subtask;
pub mod task;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthService, BcryptPasswordHasher, PasswordHasher, Registration};
pub use student::{StudentService, StudentUpdate};
pub use subtask::{SubTaskInput, SubTaskService};
pub use task::{TaskInput, TaskService};
pub use token::{Clock, ManualClock, SystemClock, TokenService, TokenServiceConfig};
