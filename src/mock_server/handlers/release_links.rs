//! Release dependency and upgrade path handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use super::{error_response, not_found, SharedState};
use crate::mock_server::state::MockState;
use crate::{ReleaseDependency, ReleaseUpgradePath};

/// Response for listing dependencies.
#[derive(Debug, Serialize)]
pub struct ListDependenciesResponse {
    pub dependencies: Vec<ReleaseDependency>,
}

/// Response for listing upgrade paths.
#[derive(Debug, Serialize)]
pub struct ListUpgradePathsResponse {
    pub upgrade_paths: Vec<ReleaseUpgradePath>,
}

#[derive(Debug, Deserialize)]
pub struct ReleaseIdParams {
    pub release_id: u64,
}

/// Body of add/remove dependency requests.
#[derive(Debug, Deserialize)]
pub struct DependencyRequest {
    pub dependency: ReleaseIdParams,
}

/// Body of add/remove upgrade path requests.
#[derive(Debug, Deserialize)]
pub struct UpgradePathRequest {
    pub upgrade_path: ReleaseIdParams,
}

/// Check that the target release exists and `other_id` is a known release.
fn check_link(
    state: &MockState,
    slug: &str,
    release_id: u64,
    other_id: u64,
) -> Result<(), Response> {
    if state.get_release(slug, release_id).is_none() {
        return Err(not_found(&format!("release {release_id}")));
    }
    if state.find_release(other_id).is_none() {
        return Err(error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("release {other_id} does not exist"),
            vec![],
        ));
    }
    Ok(())
}

/// GET /api/v2/products/{slug}/releases/{id}/dependencies
pub async fn list_dependencies(
    State(state): State<SharedState>,
    Path((slug, release_id)): Path<(String, u64)>,
) -> impl IntoResponse {
    let state = state.read().await;

    if state.get_release(&slug, release_id).is_none() {
        return not_found(&format!("release {release_id}"));
    }

    let dependencies = state.dependencies_of(release_id);
    (StatusCode::OK, Json(ListDependenciesResponse { dependencies })).into_response()
}

/// PATCH /api/v2/products/{slug}/releases/{id}/add_dependency
pub async fn add_dependency(
    State(state): State<SharedState>,
    Path((slug, release_id)): Path<(String, u64)>,
    Json(request): Json<DependencyRequest>,
) -> Response {
    let mut state = state.write().await;
    let dependent_id = request.dependency.release_id;

    if let Err(response) = check_link(&state, &slug, release_id, dependent_id) {
        return response;
    }
    state.add_dependency(release_id, dependent_id);
    StatusCode::NO_CONTENT.into_response()
}

/// PATCH /api/v2/products/{slug}/releases/{id}/remove_dependency
pub async fn remove_dependency(
    State(state): State<SharedState>,
    Path((slug, release_id)): Path<(String, u64)>,
    Json(request): Json<DependencyRequest>,
) -> Response {
    let mut state = state.write().await;
    let dependent_id = request.dependency.release_id;

    if let Err(response) = check_link(&state, &slug, release_id, dependent_id) {
        return response;
    }
    state.remove_dependency(release_id, dependent_id);
    StatusCode::NO_CONTENT.into_response()
}

/// GET /api/v2/products/{slug}/releases/{id}/upgrade_paths
pub async fn list_upgrade_paths(
    State(state): State<SharedState>,
    Path((slug, release_id)): Path<(String, u64)>,
) -> impl IntoResponse {
    let state = state.read().await;

    if state.get_release(&slug, release_id).is_none() {
        return not_found(&format!("release {release_id}"));
    }

    let upgrade_paths = state.upgrade_paths_of(release_id);
    (StatusCode::OK, Json(ListUpgradePathsResponse { upgrade_paths })).into_response()
}

/// PATCH /api/v2/products/{slug}/releases/{id}/add_upgrade_path
pub async fn add_upgrade_path(
    State(state): State<SharedState>,
    Path((slug, release_id)): Path<(String, u64)>,
    Json(request): Json<UpgradePathRequest>,
) -> Response {
    let mut state = state.write().await;
    let previous_id = request.upgrade_path.release_id;

    if let Err(response) = check_link(&state, &slug, release_id, previous_id) {
        return response;
    }
    // Upgrade paths only connect releases of the same product.
    if state.get_release(&slug, previous_id).is_none() {
        return error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("release {previous_id} does not belong to '{slug}'"),
            vec![],
        );
    }
    state.add_upgrade_path(release_id, previous_id);
    StatusCode::NO_CONTENT.into_response()
}

/// PATCH /api/v2/products/{slug}/releases/{id}/remove_upgrade_path
pub async fn remove_upgrade_path(
    State(state): State<SharedState>,
    Path((slug, release_id)): Path<(String, u64)>,
    Json(request): Json<UpgradePathRequest>,
) -> Response {
    let mut state = state.write().await;
    let previous_id = request.upgrade_path.release_id;

    if let Err(response) = check_link(&state, &slug, release_id, previous_id) {
        return response;
    }
    state.remove_upgrade_path(release_id, previous_id);
    StatusCode::NO_CONTENT.into_response()
}
