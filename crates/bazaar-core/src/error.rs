//! Centralized error types for Bazaar.

use thiserror::Error;

/// Main error type for Bazaar operations.
///
/// Messages of the client-facing variants are shown to API callers as-is.
#[derive(Error, Debug)]
pub enum BazaarError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// Uniqueness or referential-integrity violation.
    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] bazaar_db::DbError),

    #[error("Payment gateway error: {0}")]
    Payment(String),

    #[error("Push provider error: {0}")]
    Push(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for Bazaar operations.
pub type BazaarResult<T> = Result<T, BazaarError>;

impl BazaarError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Whether the caller, not the server, is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::NotFound(_) | Self::Conflict(_)
        )
    }
}
