//! Domain errors - error types for the domain layer
//!
//! Input validation never errors here: bad stock codes become an
//! `Intent::Unrecognized` reply, and remote API failures stay
//! [`UpstreamError`](super::UpstreamError)s.

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    /// No user record (or no active one) for a LINE user id
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UserNotFound(_))
    }

    /// Check if the store failed
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::DatabaseError(_))
    }
}
