//! Application error types
//!
//! Startup failures and the webhook authentication failure. Everything a
//! service can return is a `ServiceError` in `stockbot-service`.

use stockbot_core::DomainError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// `x-line-signature` missing or not matching the body
    #[error("Invalid webhook signature")]
    InvalidSignature,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Binding or serving the HTTP listener failed
    #[error("Server error: {0}")]
    Server(String),
}

/// HTTP status for a domain error
pub fn domain_status(err: &DomainError) -> u16 {
    if err.is_not_found() {
        404
    } else {
        500
    }
}

impl AppError {
    /// Get HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidSignature => 401,
            Self::Database(_) | Self::Config(_) | Self::Server(_) => 500,
        }
    }

    /// Get error code for API responses
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidSignature => "INVALID_SIGNATURE",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Server(_) => "SERVER_ERROR",
        }
    }
}
