//! Outbound replies through the messaging platform

use stockbot_core::UpstreamResult;
use tracing::{debug, error, instrument, warn};

use super::context::ServiceContext;

/// Sends reply messages; one attempt per reply token, never retried
pub struct ReplyGateway<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReplyGateway<'a> {
    /// Create a new ReplyGateway
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Reply to an event with a single text message
    #[instrument(skip(self, reply_token, text), fields(chars = text.chars().count()))]
    pub async fn send_text(&self, reply_token: &str, text: &str) -> UpstreamResult<()> {
        let result = self
            .ctx
            .messaging()
            .reply_text(reply_token, &[text.to_string()])
            .await;

        match &result {
            Ok(()) => debug!("Reply delivered"),
            // Reply tokens are single-use, so even transient failures are final
            Err(e) if e.is_transient() => warn!(error = %e, "Reply failed, platform unavailable"),
            Err(e) => error!(error = %e, "Reply rejected"),
        }
        result
    }
}
