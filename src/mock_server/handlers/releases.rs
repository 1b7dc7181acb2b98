//! Release endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use super::{error_response, not_found, SharedState};
use crate::Release;

/// Response for listing releases.
#[derive(Debug, Serialize)]
pub struct ListReleasesResponse {
    pub releases: Vec<Release>,
}

/// Request and response envelope for a single release.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReleaseEnvelope {
    pub release: Release,
}

/// Body of a create-release request.
#[derive(Debug, Deserialize)]
pub struct CreateReleaseRequest {
    pub release: Release,
    /// Accepted for parity with the API; the mock has no metadata to copy.
    #[serde(default)]
    pub copy_metadata: bool,
}

/// Response for listing release types.
#[derive(Debug, Serialize)]
pub struct ReleaseTypesResponse {
    pub release_types: Vec<String>,
}

/// GET /api/v2/products/{slug}/releases
pub async fn list_releases(
    State(state): State<SharedState>,
    Path(slug): Path<String>,
) -> impl IntoResponse {
    let state = state.read().await;

    match state.list_releases(&slug) {
        Some(releases) => {
            let releases = releases.into_iter().cloned().collect();
            (StatusCode::OK, Json(ListReleasesResponse { releases })).into_response()
        }
        None => not_found(&format!("product '{slug}'")),
    }
}

/// GET /api/v2/products/{slug}/releases/{id}
pub async fn get_release(
    State(state): State<SharedState>,
    Path((slug, release_id)): Path<(String, u64)>,
) -> impl IntoResponse {
    let state = state.read().await;

    match state.get_release(&slug, release_id) {
        Some(release) => (StatusCode::OK, Json(release.clone())).into_response(),
        None => not_found(&format!("release {release_id}")),
    }
}

/// POST /api/v2/products/{slug}/releases
pub async fn create_release(
    State(state): State<SharedState>,
    Path(slug): Path<String>,
    Json(request): Json<CreateReleaseRequest>,
) -> impl IntoResponse {
    let mut state = state.write().await;

    if state.get_product(&slug).is_none() {
        return not_found(&format!("product '{slug}'"));
    }

    let mut release = request.release;
    let mut errors = Vec::new();

    if release.version.is_empty() {
        errors.push("version can't be blank".to_string());
    } else if state
        .list_releases(&slug)
        .unwrap_or_default()
        .iter()
        .any(|r| r.version == release.version)
    {
        errors.push(format!("version {} already exists", release.version));
    }

    match release.release_type.as_deref() {
        Some(t) if state.release_types.iter().any(|known| known == t) => {}
        Some(t) => errors.push(format!("release type '{t}' is not valid")),
        None => errors.push("release type can't be blank".to_string()),
    }

    let eula_slug = release.eula.as_ref().map(|e| e.slug.clone()).unwrap_or_default();
    match state.eulas.get(&eula_slug) {
        Some(eula) => release.eula = Some(eula.clone()),
        None => errors.push(format!("EULA '{eula_slug}' does not exist")),
    }

    if !errors.is_empty() {
        return error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            "failed to create release".to_string(),
            errors,
        );
    }

    let created = state.create_release(&slug, release);
    (StatusCode::CREATED, Json(ReleaseEnvelope { release: created })).into_response()
}

/// PATCH /api/v2/products/{slug}/releases/{id}
pub async fn update_release(
    State(state): State<SharedState>,
    Path((slug, release_id)): Path<(String, u64)>,
    Json(request): Json<ReleaseEnvelope>,
) -> impl IntoResponse {
    let mut state = state.write().await;

    match state.update_release(&slug, release_id, request.release) {
        Some(release) => (
            StatusCode::OK,
            Json(ReleaseEnvelope {
                release: release.clone(),
            }),
        )
            .into_response(),
        None => not_found(&format!("release {release_id}")),
    }
}

/// DELETE /api/v2/products/{slug}/releases/{id}
pub async fn delete_release(
    State(state): State<SharedState>,
    Path((slug, release_id)): Path<(String, u64)>,
) -> impl IntoResponse {
    let mut state = state.write().await;

    if state.delete_release(&slug, release_id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        not_found(&format!("release {release_id}"))
    }
}

/// GET /api/v2/releases/release_types
pub async fn list_release_types(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;

    (
        StatusCode::OK,
        Json(ReleaseTypesResponse {
            release_types: state.release_types.clone(),
        }),
    )
}
