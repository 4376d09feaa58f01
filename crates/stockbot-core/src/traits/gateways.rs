//! Outbound API ports: messaging platform, market data, text generation

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::UpstreamError;
use crate::value_objects::StockCode;

/// Result type for outbound calls
pub type UpstreamResult<T> = Result<T, UpstreamError>;

/// Messaging platform profile of a user
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub picture_url: Option<String>,
    #[serde(default)]
    pub status_message: Option<String>,
}

/// Messaging platform (LINE Messaging API)
#[async_trait]
pub trait MessagingApi: Send + Sync {
    /// Answer an event with text messages. A reply token is single-use.
    async fn reply_text(&self, reply_token: &str, texts: &[String]) -> UpstreamResult<()>;

    /// Fetch a user's profile
    async fn get_profile(&self, user_id: &str) -> UpstreamResult<Profile>;
}

/// Market data feed (TWSE MIS)
#[async_trait]
pub trait MarketDataApi: Send + Sync {
    /// Fetch the raw quote document for a code; decoding is the caller's job
    async fn fetch_quote(&self, code: &StockCode) -> UpstreamResult<String>;
}

/// Generative text service (Gemini)
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for a single-turn prompt
    async fn generate(&self, prompt: &str) -> UpstreamResult<String>;
}
