//! Test fixtures and data generators
//!
//! Webhook event builders and the response shapes the server returns.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Deserialize;
use serde_json::{json, Value};

/// Counter for unique tokens and ids
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A fresh single-use reply token
pub fn reply_token() -> String {
    format!("R{}", unique_suffix())
}

/// Wrap events in a webhook envelope
pub fn webhook(events: Vec<Value>) -> Value {
    json!({"destination": "Ubot", "events": events})
}

pub fn follow_event(user_id: &str, reply_token: &str) -> Value {
    json!({
        "type": "follow",
        "webhookEventId": format!("E{}", unique_suffix()),
        "replyToken": reply_token,
        "source": {"type": "user", "userId": user_id}
    })
}

pub fn unfollow_event(user_id: &str) -> Value {
    json!({
        "type": "unfollow",
        "webhookEventId": format!("E{}", unique_suffix()),
        "source": {"type": "user", "userId": user_id}
    })
}

pub fn text_event(user_id: &str, reply_token: &str, text: &str) -> Value {
    json!({
        "type": "message",
        "webhookEventId": format!("E{}", unique_suffix()),
        "replyToken": reply_token,
        "source": {"type": "user", "userId": user_id},
        "message": {"type": "text", "id": unique_suffix().to_string(), "text": text}
    })
}

pub fn sticker_event(user_id: &str, reply_token: &str) -> Value {
    json!({
        "type": "message",
        "replyToken": reply_token,
        "source": {"type": "user", "userId": user_id},
        "message": {"type": "sticker", "id": "1", "packageId": "1", "stickerId": "1"}
    })
}

/// Body of a successful webhook delivery
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
pub struct DispatchReport {
    pub handled: usize,
    pub ignored: usize,
    pub failed: usize,
}

/// Reply counter endpoint response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyCountResponse {
    pub line_user_id: String,
    pub reply_count: i32,
}

/// `{error:{code,message}}` body
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

/// `{message}` body of the receiver endpoint
#[derive(Debug, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

/// A TWSE MIS document for one instrument
pub fn quote_document(name: &str, code: &str, last: &str, previous: &str) -> String {
    json!({
        "msgArray": [{
            "n": name, "c": code, "z": last, "y": previous, "v": "1200",
            "a": "105.50_106.00_", "f": "3_4_",
            "b": "105.00_104.50_", "g": "5_6_"
        }],
        "rtcode": "0000"
    })
    .to_string()
}
