//! Pipeline orchestrator for briefcast.
//!
//! Coordinates the per-podcast flow: fetch the feed, skip already-stored and
//! transcript-less items, summarize new episodes up to the run limit, and
//! persist the store after each podcast that gained any.

use crate::config::{PodcastConfig, Settings};
use crate::error::Result;
use crate::feed::{EpisodeItem, FeedSource, HttpFeedSource};
use crate::store::{EpisodeSummary, SummaryStore};
use crate::summarizer::{AnthropicSummarizer, Summarizer};
use crate::transcript::extract_transcript;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// The main orchestrator for the briefcast pipeline.
pub struct Orchestrator {
    settings: Settings,
    feed_source: Arc<dyn FeedSource>,
    summarizer: Arc<dyn Summarizer>,
}

impl Orchestrator {
    /// Create a new orchestrator with default components.
    pub fn new(settings: Settings) -> Result<Self> {
        let feed_source: Arc<dyn FeedSource> = Arc::new(HttpFeedSource::new()?);
        let summarizer: Arc<dyn Summarizer> =
            Arc::new(AnthropicSummarizer::new(settings.summarizer.clone()));

        Ok(Self {
            settings,
            feed_source,
            summarizer,
        })
    }

    /// Create an orchestrator with custom components.
    pub fn with_components(
        settings: Settings,
        feed_source: Arc<dyn FeedSource>,
        summarizer: Arc<dyn Summarizer>,
    ) -> Self {
        Self {
            settings,
            feed_source,
            summarizer,
        }
    }

    /// Get the feed source.
    pub fn feed_source(&self) -> Arc<dyn FeedSource> {
        self.feed_source.clone()
    }

    /// Get the summarizer.
    pub fn summarizer(&self) -> Arc<dyn Summarizer> {
        self.summarizer.clone()
    }

    /// Get the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Process every configured podcast once, sequentially.
    ///
    /// `limit_override` replaces the configured per-podcast episode limit for
    /// this run. A feed failure skips that podcast; a summarization failure
    /// skips that episode without consuming a limit slot. Store I/O failures
    /// abort the run: a store that could not be read must not be overwritten.
    #[instrument(skip(self))]
    pub async fn run(&self, limit_override: Option<usize>) -> Result<RunReport> {
        let limit = limit_override.unwrap_or(self.settings.general.episode_limit);
        let store_path = self.settings.store_path();
        let mut store = SummaryStore::load(&store_path)?;

        let mut report = RunReport::default();

        for podcast in &self.settings.podcasts {
            eprintln!();
            eprintln!("Fetching RSS for: {}", podcast.name);

            let items = match self.feed_source.fetch(&podcast.feed_url).await {
                Ok(items) => items,
                Err(e) => {
                    warn!("Feed fetch failed for {}: {}", podcast.id, e);
                    eprintln!("  Feed fetch failed: {}", e);
                    report.podcasts_failed += 1;
                    continue;
                }
            };
            eprintln!("  Found {} episodes", items.len());

            let summaries = self.process_podcast(podcast, &items, &store, limit).await;
            report.podcasts_processed += 1;

            if summaries.is_empty() {
                info!("No new episodes for {}", podcast.id);
                eprintln!("  No new episodes to process for {}", podcast.name);
                continue;
            }

            let new = summaries.len();
            store.append(podcast, summaries);
            store.save(&store_path)?;
            report.new_episodes += new;
            eprintln!("  Saved {} new summary(ies) for {}", new, podcast.name);
        }

        report.total_episodes = store.total_episodes();
        Ok(report)
    }

    /// Walk one podcast's feed items in order, summarizing new episodes
    /// until `limit` of them succeed.
    ///
    /// Dedup checks run against the store as it stood when this podcast
    /// started; items accumulated here are only appended by the caller.
    async fn process_podcast(
        &self,
        podcast: &PodcastConfig,
        items: &[EpisodeItem],
        store: &SummaryStore,
        limit: usize,
    ) -> Vec<EpisodeSummary> {
        let strategy = self.settings.general.match_strategy;
        let mut summaries: Vec<EpisodeSummary> = Vec::new();

        for item in items {
            if summaries.len() >= limit {
                break;
            }

            if store.contains(&podcast.id, item, strategy) {
                debug!("Already stored, skipping: {}", item.display_title());
                continue;
            }

            let Some(transcript) = extract_transcript(item) else {
                info!("No transcript in '{}', skipping", item.display_title());
                eprintln!("  No transcript found, skipping: {}", item.display_title());
                continue;
            };

            eprintln!(
                "  Processing episode {}/{}: {}",
                summaries.len() + 1,
                limit,
                item.display_title()
            );
            eprintln!("    Transcript found ({} chars)", transcript.chars().count());
            eprintln!("    Generating summary...");

            match self
                .summarizer
                .summarize(&podcast.name, item, &transcript)
                .await
            {
                Ok(summary) => {
                    eprintln!("    Summary generated ({})", summary.estimated_read_time);
                    summaries.push(EpisodeSummary::new(podcast, item, summary));
                }
                Err(e) => {
                    // Does not consume a limit slot; the next new episode
                    // is still attempted.
                    warn!("Summarization failed for '{}': {}", item.display_title(), e);
                    eprintln!("    Summarization failed: {}", e);
                }
            }
        }

        summaries
    }
}

/// Totals for one pipeline run.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Episodes newly summarized and stored this run.
    pub new_episodes: usize,
    /// Podcasts whose feed was fetched and walked.
    pub podcasts_processed: usize,
    /// Podcasts skipped because their feed could not be fetched.
    pub podcasts_failed: usize,
    /// Episodes in the store after the run, across all podcasts.
    pub total_episodes: usize,
}
