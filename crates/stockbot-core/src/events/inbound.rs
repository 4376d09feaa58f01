//! Webhook payload types and conversion into typed inbound events

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Webhook envelope: `{ "destination": "...", "events": [...] }`
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    /// Bot user id the delivery was addressed to
    #[serde(default)]
    pub destination: Option<String>,
    /// Undecoded events, decoded one at a time by [`WebhookPayload::into_events`]
    pub events: Vec<Value>,
}

impl WebhookPayload {
    /// Decode the envelope from the raw request body
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    /// Number of events in the delivery
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the delivery carries no events (the console "verify" call does this)
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Decode each event in delivery order; failures are reported per element
    pub fn into_events(self) -> impl Iterator<Item = Result<RawEvent, serde_json::Error>> {
        self.events.into_iter().map(serde_json::from_value)
    }
}

/// One webhook event as sent by the platform
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub source: Option<EventSource>,
    #[serde(default)]
    pub reply_token: Option<String>,
    #[serde(default)]
    pub message: Option<RawMessage>,
    #[serde(default)]
    pub webhook_event_id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

/// Event source (`user`, `group` or `room`)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSource {
    #[serde(rename = "type", default)]
    pub source_type: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Message body of a `message` event
#[derive(Debug, Clone, Deserialize)]
pub struct RawMessage {
    #[serde(rename = "type")]
    pub message_type: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

/// Events the bot acts on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    Follow {
        user_id: String,
        reply_token: Option<String>,
    },
    Unfollow {
        user_id: String,
    },
    TextMessage {
        user_id: Option<String>,
        reply_token: String,
        text: String,
    },
}

impl InboundEvent {
    /// Short name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Follow { .. } => "follow",
            Self::Unfollow { .. } => "unfollow",
            Self::TextMessage { .. } => "text_message",
        }
    }

    /// Originating user, when known
    pub fn user_id(&self) -> Option<&str> {
        match self {
            Self::Follow { user_id, .. } | Self::Unfollow { user_id } => Some(user_id),
            Self::TextMessage { user_id, .. } => user_id.as_deref(),
        }
    }
}

/// Why an event was skipped; skipping is not an error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IgnoreReason {
    #[error("unsupported event type {0:?}")]
    UnsupportedEvent(String),

    #[error("unsupported message type {0:?}")]
    UnsupportedMessage(String),

    #[error("event has no source user id")]
    MissingUserId,

    #[error("message event has no reply token")]
    MissingReplyToken,

    #[error("message event has no text")]
    MissingText,
}

impl RawEvent {
    /// Source user id, ignoring empty strings
    pub fn user_id(&self) -> Option<&str> {
        self.source
            .as_ref()
            .and_then(|s| s.user_id.as_deref())
            .filter(|id| !id.is_empty())
    }

    /// Map onto the events the bot handles
    pub fn into_inbound(self) -> Result<InboundEvent, IgnoreReason> {
        let user_id = self.user_id().map(str::to_string);
        let reply_token = self.reply_token.filter(|t| !t.is_empty());

        match self.event_type.as_str() {
            "follow" => Ok(InboundEvent::Follow {
                user_id: user_id.ok_or(IgnoreReason::MissingUserId)?,
                reply_token,
            }),
            "unfollow" => Ok(InboundEvent::Unfollow {
                user_id: user_id.ok_or(IgnoreReason::MissingUserId)?,
            }),
            "message" => {
                let message = self
                    .message
                    .ok_or_else(|| IgnoreReason::UnsupportedMessage(String::new()))?;
                if message.message_type != "text" {
                    return Err(IgnoreReason::UnsupportedMessage(message.message_type));
                }
                let text = message.text.ok_or(IgnoreReason::MissingText)?;
                let reply_token = reply_token.ok_or(IgnoreReason::MissingReplyToken)?;
                Ok(InboundEvent::TextMessage {
                    user_id,
                    reply_token,
                    text,
                })
            }
            other => Err(IgnoreReason::UnsupportedEvent(other.to_string())),
        }
    }
}
