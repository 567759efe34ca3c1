//! Response envelope shared by every endpoint.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// `{ "success": bool, "message": string, "data": T | null }`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(success: bool, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            success,
            message: message.into(),
            data,
        }
    }

    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self::new(true, message, Some(data))
    }
}

impl ApiResponse<()> {
    /// Success without a payload.
    pub fn done(message: impl Into<String>) -> Self {
        Self::new(true, message, None)
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(false, message, None)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
