//! Typed errors and HTTP mapping.

use crate::response::ErrorBody;
use crate::service::ValidationErrors;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config path not provided (set CONFIG_PATH or pass --config)")]
    MissingPath,
    #[error("config file does not exist: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Persistence-layer failures. `NotFound` is the only variant that is not a store malfunction.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no student found with id {0}")]
    NotFound(i64),
    #[error("failed to open storage: {0}")]
    Open(String),
    #[error("storage lock poisoned by a panicked writer")]
    Poisoned,
    #[error("query error: {0}")]
    Query(#[from] sqlx::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Decode(String),
    #[error("{0}")]
    Validation(#[from] ValidationErrors),
    #[error("invalid id {id:?}: {source}")]
    InvalidId {
        id: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Decode(_) | AppError::Validation(_) | AppError::InvalidId { .. } => {
                StatusCode::BAD_REQUEST
            }
            // Lookup misses are reported as server errors, same as any other store failure.
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(ErrorBody::new(self.to_string()))).into_response()
    }
}
