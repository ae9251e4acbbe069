//! # Notifier Core
//!
//! Core business logic and domain layer for the notifier backend.
//! This crate contains domain entities, business services, repository interfaces,
//! and error types that form the foundation of the application architecture.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    Claims, IssuedToken, NewStudent, NewSubTask, NewTask, Priority, Status, Student, SubTask, Task,
};
pub use domain::value_objects::AuthResponse;
pub use errors::{AuthError, DomainError, DomainResult, TokenError};
pub use repositories::{MemoryStore, StudentRepository, SubTaskRepository, TaskRepository};
pub use services::{
    AuthService, BcryptPasswordHasher, Clock, ManualClock, PasswordHasher, Registration,
    StudentService, StudentUpdate, SubTaskInput, SubTaskService, SystemClock, TaskInput,
    TaskService, TokenService, TokenServiceConfig,
};
