//! LINE webhook handlers
//!
//! The callback path answers a plain GET for console verification and a
//! signed POST carrying the event batch.

use axum::{extract::State, Json};
use stockbot_service::{DispatchReport, WebhookService};

use crate::extractors::SignedBody;
use crate::state::AppState;

/// Liveness probe for the platform console
///
/// GET /callback
pub async fn callback_probe() -> &'static str {
    "OK"
}

/// Receive a webhook delivery
///
/// POST /callback
///
/// 401 when the signature does not match, otherwise 200 whatever happened
/// to individual events (an unreadable envelope reports zero of each).
pub async fn callback(
    State(state): State<AppState>,
    SignedBody(body): SignedBody,
) -> Json<DispatchReport> {
    let service = WebhookService::new(state.service_context());
    Json(service.dispatch(&body).await)
}
