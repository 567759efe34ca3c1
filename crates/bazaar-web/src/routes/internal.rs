//! Internal endpoints.

use axum::extract::State;
use bazaar_db::ChangeEvent;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    pub delivered: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedStats {
    pub observers: usize,
    pub dropped_events: u64,
}

/// Receive a change event from another process and fan it out.
pub async fn notify(
    State(state): State<AppState>,
    ApiJson(event): ApiJson<ChangeEvent>,
) -> ApiResult<Delivery> {
    info!(
        entity = %event.entity(),
        action = %event.action(),
        "Received internal notification, broadcasting to observers"
    );
    let delivered = state.hub.fan_out(event);
    debug!(delivered, "Internal notification delivered");
    Ok(ApiResponse::ok("Event published.", Delivery { delivered }))
}

pub async fn stats(State(state): State<AppState>) -> ApiResult<FeedStats> {
    Ok(ApiResponse::ok(
        "Feed statistics retrieved successfully.",
        FeedStats {
            observers: state.hub.observer_count(),
            dropped_events: state.hub.dropped_events(),
        },
    ))
}
