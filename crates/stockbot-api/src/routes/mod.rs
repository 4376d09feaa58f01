//! Route definitions

use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{counter, health, receiver, webhook};
use crate::middleware::with_request_timeout;
use crate::state::AppState;

/// Create the main router with all routes
///
/// `request_timeout` bounds the health and operator routes only. A webhook
/// delivery is bounded per event by the outbound client timeouts instead.
pub fn create_router(request_timeout: Duration) -> Router<AppState> {
    Router::new()
        .merge(webhook_routes())
        .merge(with_request_timeout(health_routes(), request_timeout))
        .nest(
            "/api",
            with_request_timeout(operator_routes(), request_timeout),
        )
}

/// Webhook callback routes
fn webhook_routes() -> Router<AppState> {
    Router::new().route(
        "/callback",
        get(webhook::callback_probe).post(webhook::callback),
    )
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Operator routes
fn operator_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/countreplytimes/reply/:line_user_id",
            post(counter::increment_reply_count),
        )
        .route("/externalapi/receive/:id", get(receiver::receive))
}
