//! Variant routes.

use axum::extract::State;
use bazaar_core::variant::{self, model::{Variant, VariantInput}};

use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::response::ApiResponse;
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Variant>> {
    let records = variant::list_variants(&state.db).await?;
    Ok(ApiResponse::ok("Variants retrieved successfully.", records))
}

pub async fn show(State(state): State<AppState>, ApiPath(id): ApiPath<String>) -> ApiResult<Variant> {
    let record = variant::get_variant(&state.db, &id).await?;
    Ok(ApiResponse::ok("Variant retrieved successfully.", record))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<VariantInput>,
) -> ApiResult<Variant> {
    let record = variant::create_variant(&state.db, state.events(), input).await?;
    Ok(ApiResponse::ok("Variant created successfully.", record))
}

pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(input): ApiJson<VariantInput>,
) -> ApiResult<Variant> {
    let record = variant::update_variant(&state.db, state.events(), &id, input).await?;
    Ok(ApiResponse::ok("Variant updated successfully.", record))
}

pub async fn destroy(State(state): State<AppState>, ApiPath(id): ApiPath<String>) -> ApiResult<()> {
    variant::delete_variant(&state.db, state.events(), &id).await?;
    Ok(ApiResponse::done("Variant deleted successfully."))
}
