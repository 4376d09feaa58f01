//! Gemini `generateContent` client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use stockbot_common::GeminiConfig;
use stockbot_core::{TextGenerator, UpstreamError, UpstreamResult};
use tracing::instrument;

use crate::http::{build_client, join_url, send_for_text};

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

/// Single-turn text generation; without an API key every call is `NotConfigured`
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig, timeout: std::time::Duration) -> UpstreamResult<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: config.api_base_url.clone(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn extract_text(body: &str) -> UpstreamResult<String> {
        let response: GenerateResponse =
            serde_json::from_str(body).map_err(|e| UpstreamError::Decode(e.to_string()))?;

        response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .and_then(|part| part.text)
            .ok_or_else(|| UpstreamError::Decode("response has no candidate text".to_string()))
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    #[instrument(skip(self, prompt), fields(model = %self.model))]
    async fn generate(&self, prompt: &str) -> UpstreamResult<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(UpstreamError::NotConfigured("gemini"))?;

        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };
        let request = self
            .client
            .post(join_url(
                &self.base_url,
                &format!("v1beta/models/{}:generateContent", self.model),
            ))
            .query(&[("key", api_key)])
            .json(&body);

        let text = send_for_text(request).await?;
        Self::extract_text(&text)
    }
}
