use async_trait::async_trait;
use briefcast::error::{BriefcastError, Result};
use briefcast::feed::EpisodeItem;
use briefcast::summarizer::{SummaryDocument, Summarizer};
use std::sync::{Arc, Mutex};

/// Summarizer returning a canned document, recording (title, transcript)
/// for every call. Titles listed in `fail_titles` get an API error instead.
#[derive(Default)]
pub struct MockSummarizer {
    pub calls: Arc<Mutex<Vec<(String, String)>>>,
    fail_titles: Vec<String>,
}

impl MockSummarizer {
    /// Fail for specific episode titles, succeed for the rest.
    pub fn failing_for(titles: &[&str]) -> Self {
        Self {
            fail_titles: titles.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }
}

#[async_trait]
impl Summarizer for MockSummarizer {
    async fn summarize(
        &self,
        _podcast_name: &str,
        item: &EpisodeItem,
        transcript: &str,
    ) -> Result<SummaryDocument> {
        let title = item.title.clone().unwrap_or_default();
        self.calls
            .lock()
            .unwrap()
            .push((title.clone(), transcript.to_string()));

        if self.fail_titles.contains(&title) {
            return Err(BriefcastError::Api {
                status: 529,
                message: "overloaded".to_string(),
            });
        }

        Ok(SummaryDocument {
            one_liner: format!("Summary of {}", title),
            estimated_read_time: "12 min".to_string(),
            ..Default::default()
        })
    }
}
