//! Application state
//!
//! Holds the shared state for the Axum application: the service context, the
//! webhook signature verifier and the inbound request timeout.

use std::sync::Arc;
use std::time::Duration;

use stockbot_common::{AppConfig, SignatureVerifier};
use stockbot_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Service context containing all dependencies
    service_context: Arc<ServiceContext>,
    /// Verifier keyed by the channel secret
    verifier: Arc<SignatureVerifier>,
    /// Upper bound for a single inbound request
    request_timeout: Duration,
}

impl AppState {
    /// Create a new AppState
    pub fn new(
        service_context: ServiceContext,
        verifier: SignatureVerifier,
        request_timeout: Duration,
    ) -> Self {
        Self {
            service_context: Arc::new(service_context),
            verifier: Arc::new(verifier),
            request_timeout,
        }
    }

    /// Create an AppState using the secret and timeout from `config`
    pub fn from_config(service_context: ServiceContext, config: &AppConfig) -> Self {
        Self::new(
            service_context,
            SignatureVerifier::new(&config.line.channel_secret),
            config.http.request_timeout,
        )
    }

    /// Get the service context
    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    /// Get the webhook signature verifier
    pub fn verifier(&self) -> &SignatureVerifier {
        &self.verifier
    }

    /// Get the inbound request timeout
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &"ServiceContext")
            .field("verifier", &self.verifier)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}
