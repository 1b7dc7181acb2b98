//! Product endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use super::{not_found, SharedState};
use crate::Product;

/// Response for listing products.
#[derive(Debug, Serialize)]
pub struct ListProductsResponse {
    pub products: Vec<Product>,
}

/// GET /api/v2/products/{slug}
pub async fn get_product(
    State(state): State<SharedState>,
    Path(slug): Path<String>,
) -> impl IntoResponse {
    let state = state.read().await;

    match state.get_product(&slug) {
        Some(product) => (StatusCode::OK, Json(product.clone())).into_response(),
        None => not_found(&format!("product '{slug}'")),
    }
}

/// GET /api/v2/products
pub async fn list_products(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;

    let products = state.list_products().into_iter().cloned().collect();
    (StatusCode::OK, Json(ListProductsResponse { products }))
}
