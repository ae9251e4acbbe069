//! HTTP route handlers
//!
//! Each module exposes a `configure` function that registers its routes on
//! the scope it is mounted under.

pub mod auth;
pub mod students;
pub mod subtasks;
pub mod tasks;
