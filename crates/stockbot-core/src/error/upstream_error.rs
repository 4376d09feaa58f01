//! Errors raised by the remote HTTP APIs (messaging, market data, text generation)

use thiserror::Error;

/// Failure of an outbound call
///
/// Every variant is a transport-level detail: callers turn these into fixed
/// user-facing fallback texts and never show them to end users.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("request timed out")]
    Timeout,

    #[error("unexpected status {status}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("client not configured: {0}")]
    NotConfigured(&'static str),
}

impl UpstreamError {
    /// Create a status error, keeping at most a short prefix of the body for logs
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        let mut body = body.into();
        if body.len() > Self::MAX_BODY_LEN {
            let mut end = Self::MAX_BODY_LEN;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            body.truncate(end);
        }
        Self::Status { status, body }
    }

    const MAX_BODY_LEN: usize = 512;

    /// Whether retrying the same request could succeed
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Timeout => true,
            Self::Status { status, .. } => *status >= 500 || *status == 429,
            Self::Decode(_) | Self::NotConfigured(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_body_truncated() {
        let err = UpstreamError::status(500, "x".repeat(2000));
        match err {
            UpstreamError::Status { body, .. } => assert_eq!(body.len(), 512),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_status_truncation_respects_char_boundary() {
        let err = UpstreamError::status(400, "庫".repeat(300));
        match err {
            UpstreamError::Status { body, .. } => {
                assert!(body.len() <= 512);
                assert!(body.chars().all(|c| c == '庫'));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_is_transient() {
        assert!(UpstreamError::Timeout.is_transient());
        assert!(UpstreamError::status(503, "").is_transient());
        assert!(UpstreamError::status(429, "").is_transient());
        assert!(!UpstreamError::status(400, "").is_transient());
        assert!(!UpstreamError::Decode("bad".to_string()).is_transient());
    }
}
