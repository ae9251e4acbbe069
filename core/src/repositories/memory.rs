//! In-memory implementation of every repository trait
//!
//! All three tables live behind one lock so the cascade rules and the unique
//! email constraint of the relational schema hold here as well. Used by the
//! test suites and by the server when no `DATABASE_URL` is configured.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::entities::{NewStudent, NewSubTask, NewTask, Student, SubTask, Task};
use crate::errors::{AuthError, DomainError};

use super::{StudentRepository, SubTaskRepository, TaskRepository};

#[derive(Debug, Default)]
struct Tables {
    students: BTreeMap<i64, Student>,
    tasks: BTreeMap<i64, Task>,
    subtasks: BTreeMap<i64, SubTask>,
    last_student_id: i64,
    last_task_id: i64,
    last_subtask_id: i64,
}

impl Tables {
    fn remove_task_cascade(&mut self, task_id: i64) -> bool {
        self.subtasks.retain(|_, s| s.task_id != task_id);
        self.tasks.remove(&task_id).is_some()
    }

    fn email_taken_by_other(&self, email: &str, id: i64) -> bool {
        self.students
            .values()
            .any(|s| s.email == email && s.id != id)
    }
}

/// Shared in-memory store
///
/// Cloning is cheap and every clone sees the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudentRepository for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Student>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.students.values().find(|s| s.email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Student>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.students.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Student>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.students.values().cloned().collect())
    }

    async fn create(&self, student: NewStudent) -> Result<Student, DomainError> {
        let mut tables = self.tables.write().await;

        // Unique index on email
        if tables.students.values().any(|s| s.email == student.email) {
            return Err(AuthError::EmailAlreadyRegistered {
                email: student.email,
            }
            .into());
        }

        tables.last_student_id += 1;
        let student = student.into_student(tables.last_student_id, Utc::now());
        tables.students.insert(student.id, student.clone());
        Ok(student)
    }

    async fn update(&self, student: Student) -> Result<Student, DomainError> {
        let mut tables = self.tables.write().await;

        if !tables.students.contains_key(&student.id) {
            return Err(DomainError::not_found("Student", student.id));
        }
        if tables.email_taken_by_other(&student.email, student.id) {
            return Err(AuthError::EmailAlreadyRegistered {
                email: student.email,
            }
            .into());
        }

        tables.students.insert(student.id, student.clone());
        Ok(student)
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let mut tables = self.tables.write().await;

        if tables.students.remove(&id).is_none() {
            return Ok(false);
        }
        let owned: Vec<i64> = tables
            .tasks
            .values()
            .filter(|t| t.student_id == id)
            .map(|t| t.id)
            .collect();
        for task_id in owned {
            tables.remove_task_cascade(task_id);
        }
        Ok(true)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.students.values().any(|s| s.email == email))
    }
}

#[async_trait]
impl TaskRepository for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Task>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.tasks.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Task>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.tasks.get(&id).cloned())
    }

    async fn find_by_student(&self, student_id: i64) -> Result<Vec<Task>, DomainError> {
        let tables = self.tables.read().await;
        let mut tasks: Vec<Task> = tables
            .tasks
            .values()
            .filter(|t| t.student_id == student_id)
            .cloned()
            .collect();
        tasks.sort_by_key(|t| (t.due_date, t.id));
        Ok(tasks)
    }

    async fn create(&self, task: NewTask) -> Result<Task, DomainError> {
        let mut tables = self.tables.write().await;

        // Foreign key on student_id
        if !tables.students.contains_key(&task.student_id) {
            return Err(DomainError::not_found("Student", task.student_id));
        }

        tables.last_task_id += 1;
        let task = task.into_task(tables.last_task_id, Utc::now());
        tables.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn update(&self, task: Task) -> Result<Task, DomainError> {
        let mut tables = self.tables.write().await;

        if !tables.tasks.contains_key(&task.id) {
            return Err(DomainError::not_found("Task", task.id));
        }
        if !tables.students.contains_key(&task.student_id) {
            return Err(DomainError::not_found("Student", task.student_id));
        }

        tables.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let mut tables = self.tables.write().await;
        Ok(tables.remove_task_cascade(id))
    }
}

#[async_trait]
impl SubTaskRepository for MemoryStore {
    async fn find_all(&self) -> Result<Vec<SubTask>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.subtasks.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<SubTask>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.subtasks.get(&id).cloned())
    }

    async fn find_by_task(&self, task_id: i64) -> Result<Vec<SubTask>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables
            .subtasks
            .values()
            .filter(|s| s.task_id == task_id)
            .cloned()
            .collect())
    }

    async fn create(&self, subtask: NewSubTask) -> Result<SubTask, DomainError> {
        let mut tables = self.tables.write().await;

        if !tables.tasks.contains_key(&subtask.task_id) {
            return Err(DomainError::not_found("Task", subtask.task_id));
        }

        tables.last_subtask_id += 1;
        let subtask = subtask.into_subtask(tables.last_subtask_id, Utc::now());
        tables.subtasks.insert(subtask.id, subtask.clone());
        Ok(subtask)
    }

    async fn update(&self, subtask: SubTask) -> Result<SubTask, DomainError> {
        let mut tables = self.tables.write().await;

        if !tables.subtasks.contains_key(&subtask.id) {
            return Err(DomainError::not_found("SubTask", subtask.id));
        }
        if !tables.tasks.contains_key(&subtask.task_id) {
            return Err(DomainError::not_found("Task", subtask.task_id));
        }

        tables.subtasks.insert(subtask.id, subtask.clone());
        Ok(subtask)
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let mut tables = self.tables.write().await;
        Ok(tables.subtasks.remove(&id).is_some())
    }
}
