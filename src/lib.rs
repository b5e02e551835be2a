//! Students API: JSON CRUD service over a single student table.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{resolve_config_path, Config, HttpServer};
pub use error::{AppError, ConfigError, StoreError};
pub use model::{NewStudent, Student};
pub use response::{created_id, ok, ErrorBody};
pub use routes::{app, common_routes, student_routes};
pub use service::{validate_student, FieldViolation, Rule, ValidationErrors};
pub use state::AppState;
pub use store::{MemoryStorage, SqliteStorage, Storage};
