//! Push notification routes.

use axum::extract::State;
use bazaar_core::notification::{
    self,
    model::{DeliveryReport, Notification, NotificationInput},
};

use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::response::ApiResponse;
use crate::state::AppState;

pub async fn send(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NotificationInput>,
) -> ApiResult<Notification> {
    let push = state.push()?;
    let sent = notification::send_notification(&state.db, state.events(), push, input).await?;
    Ok(ApiResponse::ok("Notification sent successfully.", sent))
}

pub async fn track(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> ApiResult<DeliveryReport> {
    let report = notification::track_notification(state.push()?, &id).await?;
    Ok(ApiResponse::ok("Notification tracking success.", report))
}

pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Notification>> {
    let all = notification::list_notifications(&state.db).await?;
    Ok(ApiResponse::ok("Notifications retrieved successfully.", all))
}

pub async fn destroy(State(state): State<AppState>, ApiPath(id): ApiPath<String>) -> ApiResult<()> {
    notification::delete_notification(&state.db, state.events(), &id).await?;
    Ok(ApiResponse::done("Notification deleted successfully."))
}
