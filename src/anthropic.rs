//! Anthropic Messages API client.
//!
//! A minimal hand-typed client for the one endpoint this crate uses. The
//! response model only names the fields the pipeline reads; everything else
//! the API returns is ignored.

use serde::Deserialize;
use tracing::error;

use crate::error::{BriefcastError, Result};

/// Public API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";

/// Messages API revision sent with every request.
const API_VERSION: &str = "2023-06-01";

/// Client for `POST /messages`.
///
/// Requests carry no timeout; a hung call blocks until the server gives up.
pub struct AnthropicClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl AnthropicClient {
    /// Create a client with an explicit API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.into(),
        }
    }

    /// Create a client from the `ANTHROPIC_API_KEY` environment variable.
    ///
    /// A missing key is not an error here; it surfaces as an authentication
    /// failure on the first API call.
    pub fn from_env() -> Self {
        Self::new(std::env::var("ANTHROPIC_API_KEY").unwrap_or_default())
    }

    /// Override the API endpoint (self-hosted gateways, tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Send one single-turn user message and return the raw response.
    pub async fn create_message(
        &self,
        model: &str,
        max_tokens: u32,
        prompt: &str,
    ) -> Result<MessagesResponse> {
        let body = serde_json::json!({
            "model": model,
            "max_tokens": max_tokens,
            "messages": [
                {
                    "role": "user",
                    "content": prompt
                }
            ]
        });

        let resp = self
            .client
            .post(format!("{}/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .inspect_err(|e| error!(error = %e, "Messages API request failed"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(BriefcastError::Api { status, message });
        }

        Ok(resp.json::<MessagesResponse>().await?)
    }
}

/// Response body of the Messages API.
#[derive(Debug, Deserialize)]
pub struct MessagesResponse {
    pub id: String,
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub stop_reason: Option<String>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

impl MessagesResponse {
    /// The first text block, treated by callers as the entire answer.
    pub fn first_text(&self) -> Option<&str> {
        self.content.iter().find_map(|block| match block {
            ContentBlock::Text { text } => Some(text.as_str()),
            ContentBlock::Other => None,
        })
    }
}

/// One content block. Block types this crate does not understand
/// deserialize as `Other` instead of failing the whole response.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text { text: String },
    #[serde(other)]
    Other,
}

/// Token accounting reported by the API.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Usage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}
