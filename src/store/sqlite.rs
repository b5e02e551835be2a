//! SQLite-backed `Storage`. Owns the connection pool for the lifetime of the process.

use super::Storage;
use crate::config::Config;
use crate::error::StoreError;
use crate::model::Student;
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

const IN_MEMORY: &str = ":memory:";

const CREATE_STUDENTS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS students (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        age INTEGER NOT NULL
    )
"#;

type StudentRow = (i64, String, String, i32);

fn from_row((id, name, email, age): StudentRow) -> Student {
    Student { id, name, email, age }
}

#[derive(Clone, Debug)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Open the database at `config.storage_path` and ensure the students table exists.
    pub async fn connect(config: &Config) -> Result<Self, StoreError> {
        Self::open(&config.storage_path).await
    }

    /// Open by path. `:memory:` gives a private in-memory database held by a single connection.
    pub async fn open(storage_path: &str) -> Result<Self, StoreError> {
        let connected = if storage_path == IN_MEMORY {
            let opts = SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| StoreError::Open(e.to_string()))?;
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
                .connect_with(opts)
                .await
        } else {
            let parent = Path::new(storage_path).parent().filter(|p| !p.as_os_str().is_empty());
            if let Some(parent) = parent {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| StoreError::Open(format!("{}: {}", parent.display(), e)))?;
            }
            let opts = SqliteConnectOptions::new()
                .filename(storage_path)
                .create_if_missing(true);
            SqlitePoolOptions::new().max_connections(5).connect_with(opts).await
        };
        let pool = connected.map_err(|e| StoreError::Open(e.to_string()))?;

        Self::with_pool(pool).await
    }

    /// Wrap an existing pool, running the idempotent schema bootstrap.
    pub async fn with_pool(pool: SqlitePool) -> Result<Self, StoreError> {
        tracing::debug!(sql = %CREATE_STUDENTS_TABLE.trim(), "schema bootstrap");
        sqlx::query(CREATE_STUDENTS_TABLE)
            .execute(&pool)
            .await
            .map_err(|e| StoreError::Open(format!("ensure students table: {}", e)))?;
        Ok(SqliteStorage { pool })
    }

    /// Release all connections. Further calls fail with `StoreError::Query`.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl Storage for SqliteStorage {
    async fn create_student(&self, name: &str, email: &str, age: i32) -> Result<i64, StoreError> {
        let result = sqlx::query("INSERT INTO students (name, email, age) VALUES (?, ?, ?)")
            .bind(name)
            .bind(email)
            .bind(age)
            .execute(&self.pool)
            .await?;
        Ok(result.last_insert_rowid())
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Student, StoreError> {
        let row: Option<StudentRow> =
            sqlx::query_as("SELECT id, name, email, age FROM students WHERE id = ? LIMIT 1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        row.map(from_row).ok_or(StoreError::NotFound(id))
    }

    async fn get_students(&self) -> Result<Vec<Student>, StoreError> {
        let rows: Vec<StudentRow> = sqlx::query_as("SELECT id, name, email, age FROM students")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(from_row).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_then_get_roundtrip() {
        let store = SqliteStorage::open(IN_MEMORY).await.unwrap();
        let id = store.create_student("Ada", "ada@example.com", 30).await.unwrap();
        assert_eq!(id, 1);
        let s = store.get_student_by_id(id).await.unwrap();
        assert_eq!(
            s,
            Student { id: 1, name: "Ada".into(), email: "ada@example.com".into(), age: 30 }
        );
    }

    #[tokio::test]
    async fn missing_id_is_not_found() {
        let store = SqliteStorage::open(IN_MEMORY).await.unwrap();
        let err = store.get_student_by_id(42).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(42)));
    }

    #[tokio::test]
    async fn list_empty_then_grows() {
        let store = SqliteStorage::open(IN_MEMORY).await.unwrap();
        assert!(store.get_students().await.unwrap().is_empty());
        store.create_student("Ada", "ada@example.com", 30).await.unwrap();
        store.create_student("Alan", "alan@example.com", 41).await.unwrap();
        let all = store.get_students().await.unwrap();
        let names: Vec<_> = all.into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Ada", "Alan"]);
    }

    #[tokio::test]
    async fn values_are_bound_not_interpolated() {
        let store = SqliteStorage::open(IN_MEMORY).await.unwrap();
        let name = "Robert'); DROP TABLE students;--";
        let id = store.create_student(name, "bobby@example.com", 12).await.unwrap();
        assert_eq!(store.get_student_by_id(id).await.unwrap().name, name);
        assert_eq!(store.get_students().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn bootstrap_is_idempotent_on_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("students.db");
        let path = path.to_str().unwrap();

        let first = SqliteStorage::open(path).await.unwrap();
        first.create_student("Ada", "ada@example.com", 30).await.unwrap();
        first.close().await;

        let second = SqliteStorage::open(path).await.unwrap();
        let all = second.get_students().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].email, "ada@example.com");
        second.close().await;
    }

    #[tokio::test]
    async fn closed_pool_reports_query_error() {
        let store = SqliteStorage::open(IN_MEMORY).await.unwrap();
        store.close().await;
        let err = store.get_students().await.unwrap_err();
        assert!(matches!(err, StoreError::Query(_)));
    }

    #[tokio::test]
    async fn unopenable_path_fails_fast() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened as a database file.
        let err = SqliteStorage::open(dir.path().to_str().unwrap()).await.unwrap_err();
        assert!(matches!(err, StoreError::Open(_)));
    }
}
