//! Token checking.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use super::{error_response, SharedState};

/// Reject requests whose `Authorization` header does not carry the
/// configured token. Passes everything through when no token is required.
pub async fn require_token(
    State(state): State<SharedState>,
    request: Request,
    next: Next,
) -> Response {
    let required = state.read().await.required_token.clone();

    if let Some(token) = required {
        let expected = format!("Token {token}");
        let provided = request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        if provided != Some(expected.as_str()) {
            return error_response(
                StatusCode::UNAUTHORIZED,
                "invalid API token".to_string(),
                vec![],
            );
        }
    }

    next.run(request).await
}

/// GET /api/v2/authentication
pub async fn get_authentication() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({})))
}
