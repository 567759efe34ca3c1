//! Brand routes.

use axum::extract::State;
use bazaar_core::brand::{self, model::{Brand, BrandInput}};

use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::response::ApiResponse;
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Brand>> {
    let records = brand::list_brands(&state.db).await?;
    Ok(ApiResponse::ok("Brands retrieved successfully.", records))
}

pub async fn show(State(state): State<AppState>, ApiPath(id): ApiPath<String>) -> ApiResult<Brand> {
    let record = brand::get_brand(&state.db, &id).await?;
    Ok(ApiResponse::ok("Brand retrieved successfully.", record))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<BrandInput>,
) -> ApiResult<Brand> {
    let record = brand::create_brand(&state.db, state.events(), input).await?;
    Ok(ApiResponse::ok("Brand created successfully.", record))
}

pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(input): ApiJson<BrandInput>,
) -> ApiResult<Brand> {
    let record = brand::update_brand(&state.db, state.events(), &id, input).await?;
    Ok(ApiResponse::ok("Brand updated successfully.", record))
}

pub async fn destroy(State(state): State<AppState>, ApiPath(id): ApiPath<String>) -> ApiResult<()> {
    brand::delete_brand(&state.db, state.events(), &id).await?;
    Ok(ApiResponse::done("Brand deleted successfully."))
}
