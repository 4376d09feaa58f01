//! Webhook dispatch
//!
//! Decodes a verified webhook body and routes each event to its handler.
//! Events are processed one at a time in delivery order; a failing event is
//! logged and counted but never stops the rest of the batch.

use serde::Serialize;
use stockbot_core::{InboundEvent, WebhookPayload};
use tracing::{debug, error, info, instrument, warn};

use super::command::CommandService;
use super::context::ServiceContext;
use super::error::ServiceResult;
use super::lifecycle::LifecycleService;

/// Per-batch tally of event outcomes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DispatchReport {
    pub handled: usize,
    pub ignored: usize,
    pub failed: usize,
}

impl DispatchReport {
    /// Number of events in the batch
    pub fn total(&self) -> usize {
        self.handled + self.ignored + self.failed
    }
}

/// Webhook service
pub struct WebhookService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> WebhookService<'a> {
    /// Create a new WebhookService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Dispatch every event of a webhook body.
    ///
    /// Never fails once the body is authenticated: a body that is not a
    /// webhook envelope is logged and yields an empty report, and failures
    /// of individual events are only counted.
    #[instrument(skip(self, body), fields(bytes = body.len()))]
    pub async fn dispatch(&self, body: &[u8]) -> DispatchReport {
        let mut report = DispatchReport::default();

        let payload = match WebhookPayload::from_slice(body) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "Signed body is not a webhook envelope");
                return report;
            }
        };

        if payload.is_empty() {
            // The platform sends an empty batch when verifying the endpoint
            debug!("Empty webhook batch");
            return report;
        }

        for raw in payload.into_events() {
            let raw = match raw {
                Ok(raw) => raw,
                Err(e) => {
                    warn!(error = %e, "Undecodable webhook event skipped");
                    report.failed += 1;
                    continue;
                }
            };

            let event_id = raw.webhook_event_id.clone().unwrap_or_default();
            let event = match raw.into_inbound() {
                Ok(event) => event,
                Err(reason) => {
                    debug!(event_id = %event_id, %reason, "Webhook event ignored");
                    report.ignored += 1;
                    continue;
                }
            };

            let kind = event.kind();
            match self.handle(event).await {
                Ok(()) => report.handled += 1,
                Err(e) if e.is_persistence() => {
                    error!(event_id = %event_id, kind, error = %e, "Webhook event failed");
                    report.failed += 1;
                }
                Err(e) => {
                    warn!(event_id = %event_id, kind, error = %e, "Webhook event failed");
                    report.failed += 1;
                }
            }
        }

        info!(
            handled = report.handled,
            ignored = report.ignored,
            failed = report.failed,
            "Webhook batch dispatched"
        );
        report
    }

    /// Route one normalized event
    pub async fn handle(&self, event: InboundEvent) -> ServiceResult<()> {
        match event {
            InboundEvent::Follow { user_id, reply_token } => {
                LifecycleService::new(self.ctx)
                    .on_follow(&user_id, reply_token.as_deref())
                    .await?;
            }
            InboundEvent::Unfollow { user_id } => {
                LifecycleService::new(self.ctx).on_unfollow(&user_id).await?;
            }
            InboundEvent::TextMessage {
                user_id,
                reply_token,
                text,
            } => {
                CommandService::new(self.ctx)
                    .handle(user_id.as_deref(), &reply_token, &text)
                    .await?;
            }
        }
        Ok(())
    }
}
