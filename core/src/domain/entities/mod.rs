//! Domain entities representing core business objects.

pub mod student;
pub mod subtask;
pub mod task;
pub mod token;

// Re-export commonly used types
pub use student::{NewStudent, Student};
pub use subtask::{NewSubTask, SubTask};
pub use task::{NewTask, Priority, Status, Task};
pub use token::{Claims, IssuedToken};
