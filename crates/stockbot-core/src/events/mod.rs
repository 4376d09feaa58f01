//! Inbound webhook events
//!
//! A webhook delivery is decoded in two steps: the envelope first, then each
//! event on its own so one malformed element cannot sink its siblings.

mod inbound;

pub use inbound::{EventSource, IgnoreReason, InboundEvent, RawEvent, RawMessage, WebhookPayload};
