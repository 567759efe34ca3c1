//! Sub-category routes.

use axum::extract::State;
use bazaar_core::sub_category::{self, model::{SubCategory, SubCategoryInput}};

use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::response::ApiResponse;
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<SubCategory>> {
    let records = sub_category::list_sub_categories(&state.db).await?;
    Ok(ApiResponse::ok("Sub-categories retrieved successfully.", records))
}

pub async fn show(State(state): State<AppState>, ApiPath(id): ApiPath<String>) -> ApiResult<SubCategory> {
    let record = sub_category::get_sub_category(&state.db, &id).await?;
    Ok(ApiResponse::ok("Sub-category retrieved successfully.", record))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<SubCategoryInput>,
) -> ApiResult<SubCategory> {
    let record = sub_category::create_sub_category(&state.db, state.events(), input).await?;
    Ok(ApiResponse::ok("Sub-category created successfully.", record))
}

pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(input): ApiJson<SubCategoryInput>,
) -> ApiResult<SubCategory> {
    let record = sub_category::update_sub_category(&state.db, state.events(), &id, input).await?;
    Ok(ApiResponse::ok("Sub-category updated successfully.", record))
}

pub async fn destroy(State(state): State<AppState>, ApiPath(id): ApiPath<String>) -> ApiResult<()> {
    sub_category::delete_sub_category(&state.db, state.events(), &id).await?;
    Ok(ApiResponse::done("Sub-category deleted successfully."))
}
