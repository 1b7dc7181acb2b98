//! HTTP request handlers for the mock server.

pub mod auth;
pub mod eulas;
pub mod products;
pub mod release_links;
pub mod releases;

pub use auth::*;
pub use eulas::*;
pub use products::*;
pub use release_links::*;
pub use releases::*;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tokio::sync::RwLock;

use crate::mock_server::state::MockState;

/// State shared by every handler.
pub type SharedState = Arc<RwLock<MockState>>;

/// Build an API-style error body: `{"message": ..., "errors": [...]}`.
pub(crate) fn error_response(status: StatusCode, message: String, errors: Vec<String>) -> Response {
    (
        status,
        Json(serde_json::json!({
            "message": message,
            "errors": errors,
        })),
    )
        .into_response()
}

pub(crate) fn not_found(what: &str) -> Response {
    error_response(StatusCode::NOT_FOUND, format!("{what} not found"), vec![])
}
