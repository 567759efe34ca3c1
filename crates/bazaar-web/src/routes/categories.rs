//! Category routes.

use axum::extract::State;
use bazaar_core::category::{self, model::{Category, CategoryInput}};

use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::response::ApiResponse;
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Category>> {
    let records = category::list_categories(&state.db).await?;
    Ok(ApiResponse::ok("Categories retrieved successfully.", records))
}

pub async fn show(State(state): State<AppState>, ApiPath(id): ApiPath<String>) -> ApiResult<Category> {
    let record = category::get_category(&state.db, &id).await?;
    Ok(ApiResponse::ok("Category retrieved successfully.", record))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CategoryInput>,
) -> ApiResult<Category> {
    let record = category::create_category(&state.db, state.events(), input).await?;
    Ok(ApiResponse::ok("Category created successfully.", record))
}

pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(input): ApiJson<CategoryInput>,
) -> ApiResult<Category> {
    let record = category::update_category(&state.db, state.events(), &id, input).await?;
    Ok(ApiResponse::ok("Category updated successfully.", record))
}

pub async fn destroy(State(state): State<AppState>, ApiPath(id): ApiPath<String>) -> ApiResult<()> {
    category::delete_category(&state.db, state.events(), &id).await?;
    Ok(ApiResponse::done("Category deleted successfully."))
}
