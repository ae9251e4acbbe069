//! # Notifier Client
//!
//! Session boundary for front ends talking to the notifier API:
//! - [`SessionStorage`] keeps the token and the signed-in student across restarts
//! - [`ApiClient`] attaches the token to outgoing requests and ends the
//!   session when the server answers `401`
//! - [`AuthGuard`] decides whether a view may be opened without asking the server

pub mod client;
pub mod error;
pub mod guard;
pub mod models;
pub mod routes;
pub mod storage;

pub use client::ApiClient;
pub use error::{ClientError, ClientResult};
pub use guard::{AuthGuard, GuardOutcome};
pub use models::{
    LoginRequest, RegisterRequest, Session, Student, StudentUpdate, SubTask, SubTaskRequest, Task,
    TaskRequest,
};
pub use routes::{NavigationLog, Navigator, Route};
pub use storage::{FileSessionStorage, MemorySessionStorage, SessionStorage};
