//! Product routes.

use axum::extract::State;
use bazaar_core::product::{
    self,
    model::{Product, ProductInput, SharedProduct},
};

use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::response::ApiResponse;
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Product>> {
    let products = product::list_products(&state.db).await?;
    Ok(ApiResponse::ok("Products retrieved successfully.", products))
}

/// Single product with its shareable link.
pub async fn show(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<SharedProduct> {
    let shared = product::get_product(&state.db, &id, &state.config.public_url).await?;
    Ok(ApiResponse::ok("Product retrieved successfully.", shared))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<ProductInput>,
) -> ApiResult<Product> {
    let created = product::create_product(&state.db, state.events(), input).await?;
    Ok(ApiResponse::ok("Product created successfully.", created))
}

pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(input): ApiJson<ProductInput>,
) -> ApiResult<Product> {
    let updated = product::update_product(&state.db, state.events(), &id, input).await?;
    Ok(ApiResponse::ok("Product updated successfully.", updated))
}

pub async fn destroy(State(state): State<AppState>, ApiPath(id): ApiPath<String>) -> ApiResult<()> {
    product::delete_product(&state.db, state.events(), &id).await?;
    Ok(ApiResponse::done("Product deleted successfully."))
}
