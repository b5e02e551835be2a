//! Student routes.

use crate::handlers::student::{create_student, get_student, list_students};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn student_routes(state: AppState) -> Router {
    Router::new()
        .route("/students", get(list_students).post(create_student))
        .route("/students/:id", get(get_student))
        .with_state(state)
}
