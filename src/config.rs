//! Configuration settings for briefcast.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{BriefcastError, Result};

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Podcasts to process, in processing order.
    pub podcasts: Vec<PodcastConfig>,
    /// General application settings.
    pub general: GeneralSettings,
    /// Summarization settings.
    pub summarizer: SummarizerSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Path of the JSON summary store.
    pub store_path: String,
    /// Maximum newly summarized episodes per podcast per run.
    pub episode_limit: usize,
    /// How "already stored" is decided (title, audio-url).
    pub match_strategy: MatchStrategy,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            store_path: "data/summaries.json".to_string(),
            episode_limit: 1,
            match_strategy: MatchStrategy::Title,
        }
    }
}

/// A podcast subscription entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PodcastConfig {
    /// Stable identifier, used as the store key.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// RSS/Atom feed URL.
    pub feed_url: String,
    /// Podcast website.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

/// Strategy for matching a feed item against already-stored episodes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum MatchStrategy {
    /// Exact title equality (default).
    #[default]
    Title,
    /// Enclosure URL equality, falling back to title when either side has none.
    AudioUrl,
}

impl std::str::FromStr for MatchStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "title" => Ok(MatchStrategy::Title),
            "audio-url" | "audio_url" | "enclosure" => Ok(MatchStrategy::AudioUrl),
            _ => Err(format!("Unknown match strategy: {}", s)),
        }
    }
}

impl std::fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchStrategy::Title => write!(f, "title"),
            MatchStrategy::AudioUrl => write!(f, "audio-url"),
        }
    }
}

/// Summarization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerSettings {
    /// Model identifier sent to the generation API.
    pub model: String,
    /// Maximum generated tokens per summary.
    pub max_tokens: u32,
    /// Transcript truncation budget, in characters.
    pub max_transcript_chars: usize,
    /// API base URL override (defaults to the public Anthropic endpoint).
    pub base_url: Option<String>,
}

impl Default for SummarizerSettings {
    fn default() -> Self {
        Self {
            model: "claude-sonnet-4-20250514".to_string(),
            max_tokens: 4000,
            max_transcript_chars: 100_000,
            base_url: None,
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or discovered location if None.
    pub fn load_from(path: Option<&PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::discover_config_path(),
        };

        let settings = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Settings::default()
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Find the configuration file: ./briefcast.toml, then the user config dir.
    fn discover_config_path() -> PathBuf {
        let local = PathBuf::from("briefcast.toml");
        if local.exists() {
            return local;
        }
        Self::default_config_path()
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("briefcast")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded summary store path.
    pub fn store_path(&self) -> PathBuf {
        Self::expand_path(&self.general.store_path)
    }

    /// Look up a configured podcast by id.
    pub fn podcast(&self, id: &str) -> Option<&PodcastConfig> {
        self.podcasts.iter().find(|p| p.id == id)
    }

    /// Check podcast entries for empty or duplicate ids and unparseable feed URLs.
    pub fn validate(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for podcast in &self.podcasts {
            if podcast.id.trim().is_empty() {
                return Err(BriefcastError::Config(format!(
                    "Podcast '{}' has an empty id",
                    podcast.name
                )));
            }
            if !seen.insert(podcast.id.as_str()) {
                return Err(BriefcastError::Config(format!(
                    "Duplicate podcast id: {}",
                    podcast.id
                )));
            }
            url::Url::parse(&podcast.feed_url).map_err(|e| {
                BriefcastError::Config(format!(
                    "Invalid feed URL for '{}': {}",
                    podcast.id, e
                ))
            })?;
        }
        Ok(())
    }
}
