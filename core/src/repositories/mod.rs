//! Repository interfaces for data persistence.
//!
//! Each trait is async-first and object safe; services hold them as
//! `Arc<dyn ...>` so the MySQL implementation in the infrastructure crate and
//! the in-memory store below are interchangeable.

pub mod memory;
pub mod student;
pub mod subtask;
pub mod task;

pub use memory::MemoryStore;
pub use student::StudentRepository;
pub use subtask::SubTaskRepository;
pub use task::TaskRepository;
