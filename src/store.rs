//! The JSON summary store.
//!
//! A single document, `{ "podcasts": { id: { ...config, episodes: [...] } } }`,
//! read fully into memory at run start and rewritten wholesale after each
//! podcast that gained episodes. It serves both as the dedup index and as
//! the output artifact. No schema versioning, no migrations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

use crate::config::{MatchStrategy, PodcastConfig};
use crate::error::Result;
use crate::feed::EpisodeItem;
use crate::summarizer::SummaryDocument;

/// One persisted episode summary. Created once, never mutated afterward.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EpisodeSummary {
    /// Synthetic id: `{podcast_id}-{unix_millis}`.
    pub id: String,
    pub podcast_id: String,
    pub podcast_name: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    pub summary: SummaryDocument,
    pub processed_at: DateTime<Utc>,
}

impl EpisodeSummary {
    /// Build a record for a freshly summarized feed item.
    pub fn new(podcast: &PodcastConfig, item: &EpisodeItem, summary: SummaryDocument) -> Self {
        let now = Utc::now();
        Self {
            id: format!("{}-{}", podcast.id, now.timestamp_millis()),
            podcast_id: podcast.id.clone(),
            podcast_name: podcast.name.clone(),
            title: item.title.clone().unwrap_or_default(),
            published_date: item.pub_date.clone(),
            audio_url: item.audio_url.clone(),
            duration: item.duration.clone(),
            summary,
            processed_at: now,
        }
    }

    /// Whether this record matches a feed item under the given strategy.
    pub fn matches(&self, item: &EpisodeItem, strategy: MatchStrategy) -> bool {
        match strategy {
            MatchStrategy::Title => self.title_matches(item),
            // Fall back to title when either side lacks an enclosure URL,
            // so records that predate enclosure capture still dedup.
            MatchStrategy::AudioUrl => match (&self.audio_url, &item.audio_url) {
                (Some(stored), Some(incoming)) => stored == incoming,
                _ => self.title_matches(item),
            },
        }
    }

    fn title_matches(&self, item: &EpisodeItem) -> bool {
        self.title == item.title.as_deref().unwrap_or_default()
    }
}

/// A podcast's slot in the store: its configuration plus everything
/// summarized so far, in processing order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PodcastRecord {
    #[serde(flatten)]
    pub podcast: PodcastConfig,
    #[serde(default)]
    pub episodes: Vec<EpisodeSummary>,
}

/// The whole persisted document.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SummaryStore {
    pub podcasts: BTreeMap<String, PodcastRecord>,
}

impl SummaryStore {
    /// Read the store, or start empty when the file does not exist yet.
    ///
    /// Any other read or parse failure propagates; a run must not overwrite
    /// a store it could not read.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No store at {}, starting empty", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Overwrite the whole store file, creating parent directories first.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        debug!("Wrote store with {} episodes to {}", self.total_episodes(), path.display());
        Ok(())
    }

    /// Episodes stored for one podcast; empty when the podcast is unknown.
    pub fn episodes(&self, podcast_id: &str) -> &[EpisodeSummary] {
        self.podcasts
            .get(podcast_id)
            .map(|r| r.episodes.as_slice())
            .unwrap_or(&[])
    }

    /// Whether a feed item is already stored for this podcast.
    pub fn contains(&self, podcast_id: &str, item: &EpisodeItem, strategy: MatchStrategy) -> bool {
        self.episodes(podcast_id)
            .iter()
            .any(|ep| ep.matches(item, strategy))
    }

    /// Append freshly summarized episodes, creating the podcast's record on
    /// first contact.
    pub fn append(&mut self, podcast: &PodcastConfig, summaries: Vec<EpisodeSummary>) {
        let record = self
            .podcasts
            .entry(podcast.id.clone())
            .or_insert_with(|| PodcastRecord {
                podcast: podcast.clone(),
                episodes: Vec::new(),
            });
        record.episodes.extend(summaries);
    }

    /// Total stored episodes across all podcasts.
    pub fn total_episodes(&self) -> usize {
        self.podcasts.values().map(|r| r.episodes.len()).sum()
    }
}
