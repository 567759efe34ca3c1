//! Payment gateway routes.

use axum::extract::State;
use bazaar_core::payment::{
    self,
    model::{PaymentSheet, RazorpayKey, StripePaymentRequest},
};

use crate::config::present;
use crate::error::ApiResult;
use crate::extract::ApiJson;
use crate::response::ApiResponse;
use crate::state::AppState;

pub async fn stripe(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<StripePaymentRequest>,
) -> ApiResult<PaymentSheet> {
    let stripe = state.stripe()?;
    let publishable_key = state.stripe_publishable_key()?;
    let sheet =
        payment::start_stripe_payment(stripe, publishable_key, state.events(), request).await?;
    Ok(ApiResponse::ok("Payment sheet created successfully.", sheet))
}

pub async fn razorpay(State(state): State<AppState>) -> ApiResult<RazorpayKey> {
    let key = payment::razorpay_key(present(&state.config.razorpay_key), state.events())?;
    Ok(ApiResponse::ok("Razorpay key retrieved successfully.", key))
}
