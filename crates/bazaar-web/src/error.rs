//! Mapping of core errors onto HTTP responses.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bazaar_core::BazaarError;
use tracing::error;

use crate::response::ApiResponse;

#[derive(Debug)]
pub enum ApiError {
    Core(BazaarError),
    /// The request could not be decoded.
    BadRequest(String),
}

pub type ApiResult<T> = Result<ApiResponse<T>, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Core(BazaarError::Validation(_) | BazaarError::Conflict(_)) => {
                StatusCode::BAD_REQUEST
            }
            Self::Core(BazaarError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Core(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<BazaarError> for ApiError {
    fn from(e: BazaarError) -> Self {
        Self::Core(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::BadRequest(msg) => msg,
            Self::Core(e) => {
                if status.is_server_error() {
                    error!(error = %e, "Request failed");
                }
                e.to_string()
            }
        };
        (status, ApiResponse::failure(message)).into_response()
    }
}
