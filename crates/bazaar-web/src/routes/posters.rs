//! Poster routes.

use axum::extract::State;
use bazaar_core::poster::{self, model::{Poster, PosterInput}};

use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::response::ApiResponse;
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Poster>> {
    let records = poster::list_posters(&state.db).await?;
    Ok(ApiResponse::ok("Posters retrieved successfully.", records))
}

pub async fn show(State(state): State<AppState>, ApiPath(id): ApiPath<String>) -> ApiResult<Poster> {
    let record = poster::get_poster(&state.db, &id).await?;
    Ok(ApiResponse::ok("Poster retrieved successfully.", record))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<PosterInput>,
) -> ApiResult<Poster> {
    let record = poster::create_poster(&state.db, state.events(), input).await?;
    Ok(ApiResponse::ok("Poster created successfully.", record))
}

pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(input): ApiJson<PosterInput>,
) -> ApiResult<Poster> {
    let record = poster::update_poster(&state.db, state.events(), &id, input).await?;
    Ok(ApiResponse::ok("Poster updated successfully.", record))
}

pub async fn destroy(State(state): State<AppState>, ApiPath(id): ApiPath<String>) -> ApiResult<()> {
    poster::delete_poster(&state.db, state.events(), &id).await?;
    Ok(ApiResponse::done("Poster deleted successfully."))
}
