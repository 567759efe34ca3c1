//! Variant type routes.

use axum::extract::State;
use bazaar_core::variant_type::{self, model::{VariantType, VariantTypeInput}};

use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::response::ApiResponse;
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<VariantType>> {
    let records = variant_type::list_variant_types(&state.db).await?;
    Ok(ApiResponse::ok("VariantTypes retrieved successfully.", records))
}

pub async fn show(State(state): State<AppState>, ApiPath(id): ApiPath<String>) -> ApiResult<VariantType> {
    let record = variant_type::get_variant_type(&state.db, &id).await?;
    Ok(ApiResponse::ok("VariantType retrieved successfully.", record))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<VariantTypeInput>,
) -> ApiResult<VariantType> {
    let record = variant_type::create_variant_type(&state.db, state.events(), input).await?;
    Ok(ApiResponse::ok("VariantType created successfully.", record))
}

pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(input): ApiJson<VariantTypeInput>,
) -> ApiResult<VariantType> {
    let record = variant_type::update_variant_type(&state.db, state.events(), &id, input).await?;
    Ok(ApiResponse::ok("VariantType updated successfully.", record))
}

pub async fn destroy(State(state): State<AppState>, ApiPath(id): ApiPath<String>) -> ApiResult<()> {
    variant_type::delete_variant_type(&state.db, state.events(), &id).await?;
    Ok(ApiResponse::done("Variant type deleted successfully."))
}
