//! Router assembly.

mod common;
mod student;

pub use common::common_routes;
pub use student::student_routes;

use crate::state::AppState;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Request bodies above this size are rejected with 413 before reaching a handler.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Full application: common routes plus student routes, with request tracing and a body limit.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes())
        .merge(student_routes(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES)),
        )
}
