//! Order routes.

use axum::extract::State;
use bazaar_core::order::{
    self,
    model::{Order, OrderInput, OrderUpdate},
};

use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::response::ApiResponse;
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Order>> {
    let orders = order::list_orders(&state.db).await?;
    Ok(ApiResponse::ok("Orders retrieved successfully.", orders))
}

pub async fn list_by_user(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<String>,
) -> ApiResult<Vec<Order>> {
    let orders = order::list_orders_by_user(&state.db, &user_id).await?;
    Ok(ApiResponse::ok("Orders retrieved successfully.", orders))
}

pub async fn show(State(state): State<AppState>, ApiPath(id): ApiPath<String>) -> ApiResult<Order> {
    let found = order::get_order(&state.db, &id).await?;
    Ok(ApiResponse::ok("Order retrieved successfully.", found))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<OrderInput>,
) -> ApiResult<Order> {
    let created = order::create_order(&state.db, state.events(), input).await?;
    Ok(ApiResponse::ok("Order created successfully.", created))
}

pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(update): ApiJson<OrderUpdate>,
) -> ApiResult<Order> {
    let updated = order::update_order(&state.db, state.events(), &id, update).await?;
    Ok(ApiResponse::ok("Order updated successfully.", updated))
}

pub async fn destroy(State(state): State<AppState>, ApiPath(id): ApiPath<String>) -> ApiResult<()> {
    order::delete_order(&state.db, state.events(), &id).await?;
    Ok(ApiResponse::done("Order deleted successfully."))
}
