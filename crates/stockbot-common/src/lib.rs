//! # stockbot-common
//!
//! Shared utilities including configuration, error handling, webhook
//! signature verification, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{SignatureVerifier, SIGNATURE_HEADER};
pub use config::{
    AppConfig, AppSettings, ConfigError, DatabaseConfig, Environment, GeminiConfig, HttpConfig,
    LineConfig, MarketConfig, ServerConfig,
};
pub use error::{domain_status, AppError};
pub use telemetry::{try_init_tracing, try_init_tracing_with_config, TracingConfig, TracingError};
