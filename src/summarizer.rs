//! Summary generation.
//!
//! Turns an extracted transcript into a [`SummaryDocument`] via the
//! Anthropic Messages API. The model is asked for bare JSON but routinely
//! wraps it in a markdown code fence; extraction tolerates that.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::anthropic::AnthropicClient;
use crate::config::SummarizerSettings;
use crate::error::{BriefcastError, Result};
use crate::feed::EpisodeItem;
use crate::prompt::{build_summary_prompt, truncate_chars};

/// Structured summary for one episode, as returned by the generation API.
///
/// Every field tolerates absence on deserialization; the model sometimes
/// omits sections for thin episodes.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct SummaryDocument {
    /// Single sentence capturing the core insight.
    pub one_liner: String,
    /// Human-readable estimate, e.g. "15 min".
    pub estimated_read_time: String,
    pub key_insights: Vec<KeyInsight>,
    pub actionable_takeaways: Vec<String>,
    pub notable_quotes: Vec<NotableQuote>,
    pub topics_discussed: Vec<String>,
    pub who_should_listen: String,
}

/// One thematic insight from the episode.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct KeyInsight {
    pub category: String,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_highlights: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// A quotable line, optionally attributed.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct NotableQuote {
    pub quote: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// Generates a structured summary for one episode.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(
        &self,
        podcast_name: &str,
        item: &EpisodeItem,
        transcript: &str,
    ) -> Result<SummaryDocument>;
}

/// Summarizer backed by the Anthropic Messages API.
pub struct AnthropicSummarizer {
    client: AnthropicClient,
    settings: SummarizerSettings,
}

impl AnthropicSummarizer {
    /// Build a summarizer from settings, reading the API key from the
    /// environment.
    pub fn new(settings: SummarizerSettings) -> Self {
        let mut client = AnthropicClient::from_env();
        if let Some(url) = &settings.base_url {
            client = client.with_base_url(url.clone());
        }
        Self { client, settings }
    }
}

#[async_trait]
impl Summarizer for AnthropicSummarizer {
    #[instrument(skip_all, fields(episode = %item.display_title()))]
    async fn summarize(
        &self,
        podcast_name: &str,
        item: &EpisodeItem,
        transcript: &str,
    ) -> Result<SummaryDocument> {
        let prompt = build_summary_prompt(
            podcast_name,
            item,
            transcript,
            self.settings.max_transcript_chars,
        );

        let response = self
            .client
            .create_message(&self.settings.model, self.settings.max_tokens, &prompt)
            .await?;

        if response.stop_reason.as_deref() == Some("max_tokens") {
            warn!("response hit the max_tokens ceiling; JSON may be cut off");
        }

        let text = response.first_text().ok_or_else(|| {
            BriefcastError::SummaryExtraction("response contains no text block".to_string())
        })?;
        debug!("Model returned {} characters", text.chars().count());

        extract_summary_document(text)
    }
}

/// Pull the JSON summary out of model output.
///
/// If the text contains a markdown code fence (```` ```json ```` or plain
/// ```` ``` ````), only the content between the first pair of fences is
/// parsed and surrounding prose is ignored; an unterminated fence takes the
/// rest of the text. Without a fence the whole trimmed text is parsed.
pub fn extract_summary_document(text: &str) -> Result<SummaryDocument> {
    let json_text = extract_fenced_block(text).unwrap_or_else(|| text.trim());
    serde_json::from_str(json_text).map_err(|e| {
        BriefcastError::SummaryExtraction(format!(
            "model output is not valid JSON ({}): {}",
            e,
            snippet(json_text)
        ))
    })
}

fn extract_fenced_block(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let after = &text[open + 3..];
    let after = after.strip_prefix("json").unwrap_or(after);
    let body = match after.find("```") {
        Some(close) => &after[..close],
        None => after,
    };
    Some(body.trim())
}

fn snippet(text: &str) -> String {
    const MAX_SNIPPET_CHARS: usize = 120;
    if text.chars().count() <= MAX_SNIPPET_CHARS {
        text.to_string()
    } else {
        format!("{}...", truncate_chars(text, MAX_SNIPPET_CHARS))
    }
}
