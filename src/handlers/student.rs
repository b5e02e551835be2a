//! Student handlers: decode, validate, call the store, respond. The first failure ends the request.

use crate::error::AppError;
use crate::model::NewStudent;
use crate::response::{created_id, ok};
use crate::service::validate_student;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{Path, State},
    response::IntoResponse,
};
use serde_json::{Map, Value};

pub const EMPTY_BODY: &str = "body cannot be empty";

fn decode_body(body: &[u8]) -> Result<NewStudent, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(AppError::Decode(EMPTY_BODY.into()));
    }
    // Only a JSON object is a student body; arrays would otherwise fill fields positionally.
    let map: Map<String, Value> =
        serde_json::from_slice(body).map_err(|e| AppError::Decode(e.to_string()))?;
    serde_json::from_value(Value::Object(map)).map_err(|e| AppError::Decode(e.to_string()))
}

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str.parse().map_err(|source| AppError::InvalidId {
        id: id_str.to_string(),
        source,
    })
}

/// POST /students
pub async fn create_student(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!("creating a student");
    let student = decode_body(&body)?;
    validate_student(&student)?;
    let id = state
        .storage
        .create_student(&student.name, &student.email, student.age)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "failed to create student");
            e
        })?;
    tracing::info!(id, "student created");
    Ok(created_id(id))
}

/// GET /students/:id
pub async fn get_student(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    tracing::info!(id = %id_str, "getting a student by id");
    let id = parse_id(&id_str)?;
    let student = state.storage.get_student_by_id(id).await.map_err(|e| {
        tracing::error!(id, error = %e, "error getting student");
        e
    })?;
    Ok(ok(student))
}

/// GET /students
pub async fn list_students(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    tracing::info!("getting list of students");
    let students = state.storage.get_students().await.map_err(|e| {
        tracing::error!(error = %e, "error getting list of students");
        e
    })?;
    tracing::debug!(count = students.len(), "students listed");
    Ok(ok(students))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_body_is_empty() {
        for body in [&b""[..], &b"   \n\t"[..]] {
            let err = decode_body(body).unwrap_err();
            assert_eq!(err.to_string(), EMPTY_BODY);
        }
    }

    #[test]
    fn malformed_json_carries_decoder_message() {
        let err = decode_body(b"{\"name\": ").unwrap_err();
        assert!(matches!(err, AppError::Decode(ref m) if m != EMPTY_BODY));
    }

    #[test]
    fn non_object_body_is_a_decode_error() {
        let bodies: [&[u8]; 4] = [br#"["Ada","ada@example.com",30]"#, b"[]", br#""Ada""#, b"30"];
        for body in bodies {
            let err = decode_body(body).unwrap_err();
            let expected = matches!(err, AppError::Decode(ref m) if m.contains("expected a map"));
            assert!(expected, "{err}");
        }
    }

    #[test]
    fn id_must_be_an_integer() {
        assert_eq!(parse_id("17").unwrap(), 17);
        assert!(matches!(parse_id("1.5"), Err(AppError::InvalidId { .. })));
        assert!(matches!(parse_id("abc"), Err(AppError::InvalidId { .. })));
    }
}
