//! LINE Messaging API client

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use stockbot_common::LineConfig;
use stockbot_core::{MessagingApi, Profile, UpstreamError, UpstreamResult};
use tracing::{debug, instrument};

use crate::http::{build_client, join_url, send_for_text};

/// The platform accepts at most five messages per reply
const MAX_MESSAGES_PER_REPLY: usize = 5;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplyRequest<'a> {
    reply_token: &'a str,
    messages: Vec<TextMessage<'a>>,
}

#[derive(Serialize)]
struct TextMessage<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    text: &'a str,
}

/// Bearer-token client for reply and profile calls
#[derive(Clone)]
pub struct LineClient {
    client: Client,
    base_url: String,
    access_token: String,
}

impl LineClient {
    pub fn new(config: &LineConfig, timeout: std::time::Duration) -> UpstreamResult<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: config.api_base_url.clone(),
            access_token: config.channel_access_token.clone(),
        })
    }
}

#[async_trait]
impl MessagingApi for LineClient {
    #[instrument(skip(self, texts), fields(messages = texts.len()))]
    async fn reply_text(&self, reply_token: &str, texts: &[String]) -> UpstreamResult<()> {
        if texts.is_empty() || texts.len() > MAX_MESSAGES_PER_REPLY {
            return Err(UpstreamError::Transport(format!(
                "a reply carries 1 to {MAX_MESSAGES_PER_REPLY} messages, got {}",
                texts.len()
            )));
        }

        let body = ReplyRequest {
            reply_token,
            messages: texts
                .iter()
                .map(|text| TextMessage { kind: "text", text })
                .collect(),
        };
        let request = self
            .client
            .post(join_url(&self.base_url, "v2/bot/message/reply"))
            .bearer_auth(&self.access_token)
            .json(&body);

        send_for_text(request).await?;
        debug!("Reply accepted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_profile(&self, user_id: &str) -> UpstreamResult<Profile> {
        let request = self
            .client
            .get(join_url(&self.base_url, &format!("v2/bot/profile/{user_id}")))
            .bearer_auth(&self.access_token);

        let body = send_for_text(request).await?;
        serde_json::from_str(&body).map_err(|e| UpstreamError::Decode(e.to_string()))
    }
}
