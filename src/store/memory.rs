//! In-process `Storage` used by tests and for running without a database file.

use super::Storage;
use crate::error::StoreError;
use crate::model::Student;
use async_trait::async_trait;
use std::sync::RwLock;

#[derive(Debug, Default)]
pub struct MemoryStorage {
    students: RwLock<Vec<Student>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Poisoned
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn create_student(&self, name: &str, email: &str, age: i32) -> Result<i64, StoreError> {
        let mut students = self.students.write().map_err(poisoned)?;
        let id = students.last().map(|s| s.id + 1).unwrap_or(1);
        students.push(Student {
            id,
            name: name.to_string(),
            email: email.to_string(),
            age,
        });
        Ok(id)
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Student, StoreError> {
        let students = self.students.read().map_err(poisoned)?;
        students
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn get_students(&self) -> Result<Vec<Student>, StoreError> {
        Ok(self.students.read().map_err(poisoned)?.clone())
    }
}
