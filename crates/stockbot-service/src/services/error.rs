//! Service layer error type
//!
//! Per-event failures inside a webhook batch are logged and counted rather
//! than returned, so only the operator endpoints and a malformed envelope
//! ever turn one of these into an HTTP status.

use std::fmt;

use stockbot_common::domain_status;
use stockbot_core::{DomainError, UpstreamError};

#[derive(Debug)]
pub enum ServiceError {
    /// Domain rule violation or persistence failure
    Domain(DomainError),

    /// A remote API call failed
    Upstream(UpstreamError),

    NotFound { resource: &'static str, id: String },

    Validation(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Domain(e) => write!(f, "{e}"),
            Self::Upstream(e) => write!(f, "Upstream error: {e}"),
            Self::NotFound { resource, id } => write!(f, "{resource} not found: {id}"),
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            Self::Upstream(e) => Some(e),
            Self::NotFound { .. } | Self::Validation(_) => None,
        }
    }
}

impl ServiceError {
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Whether the store was unreachable or rejected a statement
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Domain(e) if e.is_persistence())
    }

    /// Whether the referenced user does not exist
    pub fn is_user_not_found(&self) -> bool {
        matches!(
            self,
            Self::Domain(DomainError::UserNotFound(_)) | Self::NotFound { resource: "User", .. }
        )
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => domain_status(e),
            Self::Upstream(e) if e.is_transient() => 503,
            Self::Upstream(_) => 502,
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 400,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Domain(e) => e.code(),
            Self::Upstream(e) if e.is_transient() => "UPSTREAM_UNAVAILABLE",
            Self::Upstream(_) => "UPSTREAM_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
        }
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<UpstreamError> for ServiceError {
    fn from(err: UpstreamError) -> Self {
        Self::Upstream(err)
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
