//! EULA endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use super::{not_found, SharedState};
use crate::{Eula, EulaAcceptance};

/// Response for listing EULAs.
#[derive(Debug, Serialize)]
pub struct ListEulasResponse {
    pub eulas: Vec<Eula>,
}

/// GET /api/v2/eulas
pub async fn list_eulas(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;

    // The list endpoint omits agreement text.
    let eulas = state
        .eulas
        .values()
        .map(|e| Eula {
            content: None,
            ..e.clone()
        })
        .collect();
    (StatusCode::OK, Json(ListEulasResponse { eulas }))
}

/// GET /api/v2/eulas/{slug}
pub async fn get_eula(
    State(state): State<SharedState>,
    Path(slug): Path<String>,
) -> impl IntoResponse {
    let state = state.read().await;

    match state.eulas.get(&slug) {
        Some(eula) => (StatusCode::OK, Json(eula.clone())).into_response(),
        None => not_found(&format!("EULA '{slug}'")),
    }
}

/// POST /api/v2/products/{slug}/releases/{id}/eula_acceptance
pub async fn accept_eula(
    State(state): State<SharedState>,
    Path((slug, release_id)): Path<(String, u64)>,
) -> impl IntoResponse {
    let mut state = state.write().await;

    if state.get_release(&slug, release_id).is_none() {
        return not_found(&format!("release {release_id}"));
    }
    state.eula_acceptances.insert(release_id);

    let acceptance = EulaAcceptance {
        accepted_at: chrono::Utc::now().format("%Y-%m-%d").to_string(),
    };
    (StatusCode::OK, Json(acceptance)).into_response()
}
