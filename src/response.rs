//! Response envelope: raw payloads on success, `{"status":"Error","error":..}` on failure.

use axum::{http::StatusCode, Json};
use serde::Serialize;

pub const STATUS_OK: &str = "ok";
pub const STATUS_ERROR: &str = "Error";

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        ErrorBody {
            status: STATUS_ERROR,
            error: error.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedId {
    #[serde(rename = "ID")]
    pub id: i64,
}

/// 201 with the store-assigned id.
pub fn created_id(id: i64) -> (StatusCode, Json<CreatedId>) {
    (StatusCode::CREATED, Json(CreatedId { id }))
}

/// 200 with the payload as-is.
pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_shape() {
        let v = serde_json::to_value(ErrorBody::new("body cannot be empty")).unwrap();
        assert_eq!(v, serde_json::json!({"status": "Error", "error": "body cannot be empty"}));
    }

    #[test]
    fn created_id_shape() {
        let (status, Json(body)) = created_id(5);
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(serde_json::to_value(body).unwrap(), serde_json::json!({"ID": 5}));
    }
}
