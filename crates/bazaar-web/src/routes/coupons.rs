//! Coupon code routes.

use axum::extract::State;
use bazaar_core::coupon::{
    self,
    model::{Coupon, CouponCheck, CouponInput},
};

use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::response::ApiResponse;
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Coupon>> {
    let coupons = coupon::list_coupons(&state.db).await?;
    Ok(ApiResponse::ok("Coupons retrieved successfully.", coupons))
}

pub async fn show(State(state): State<AppState>, ApiPath(id): ApiPath<String>) -> ApiResult<Coupon> {
    let found = coupon::get_coupon(&state.db, &id).await?;
    Ok(ApiResponse::ok("Coupon retrieved successfully.", found))
}

pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CouponInput>,
) -> ApiResult<Coupon> {
    let created = coupon::create_coupon(&state.db, state.events(), input).await?;
    Ok(ApiResponse::ok("Coupon created successfully.", created))
}

pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(input): ApiJson<CouponInput>,
) -> ApiResult<Coupon> {
    let updated = coupon::update_coupon(&state.db, state.events(), &id, input).await?;
    Ok(ApiResponse::ok("Coupon updated successfully.", updated))
}

pub async fn destroy(State(state): State<AppState>, ApiPath(id): ApiPath<String>) -> ApiResult<()> {
    coupon::delete_coupon(&state.db, state.events(), &id).await?;
    Ok(ApiResponse::done("Coupon deleted successfully."))
}

/// Always 200; `success` tells whether the coupon applies.
pub async fn check(
    State(state): State<AppState>,
    ApiJson(check): ApiJson<CouponCheck>,
) -> ApiResult<Coupon> {
    let verdict = coupon::check_coupon(&state.db, check).await?;
    Ok(ApiResponse::new(
        verdict.applicable,
        verdict.message,
        verdict.coupon,
    ))
}
