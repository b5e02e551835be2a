//! Storage contract for student records and its implementations.

mod memory;
mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

use crate::error::StoreError;
use crate::model::Student;
use async_trait::async_trait;

/// The only persistence dependency handlers take.
/// Implementations must be safe to share across requests.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Persist a new record and return the id assigned by the store.
    async fn create_student(&self, name: &str, email: &str, age: i32) -> Result<i64, StoreError>;

    /// Fails with `StoreError::NotFound` when no record has this id.
    async fn get_student_by_id(&self, id: i64) -> Result<Student, StoreError>;

    /// All records in store order. Empty store yields an empty vec.
    async fn get_students(&self) -> Result<Vec<Student>, StoreError>;
}
