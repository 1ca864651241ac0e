//! Briefcast - Podcast Episode Summaries
//!
//! A CLI pipeline that turns podcast RSS feeds into structured episode
//! summaries with Claude, persisted to a single local JSON store.
//!
//! # Overview
//!
//! Briefcast allows you to:
//! - Follow a configured list of podcast RSS/Atom feeds
//! - Pick up transcript-length show notes straight from the feed
//! - Generate structured summaries (insights, takeaways, quotes) per episode
//! - Keep an incremental, deduplicated JSON archive of everything summarized
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `feed` - Feed fetching and parsing
//! - `transcript` - Transcript extraction heuristic
//! - `prompt` - Summary prompt construction
//! - `anthropic` - Anthropic Messages API client
//! - `summarizer` - Summary generation and JSON extraction
//! - `store` - The persisted summary store
//! - `orchestrator` - Pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use briefcast::config::Settings;
//! use briefcast::orchestrator::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let orchestrator = Orchestrator::new(settings)?;
//!
//!     // Summarize up to one new episode per configured podcast
//!     let report = orchestrator.run(None).await?;
//!     println!("Summarized {} new episodes", report.new_episodes);
//!
//!     Ok(())
//! }
//! ```

pub mod anthropic;
pub mod cli;
pub mod config;
pub mod error;
pub mod feed;
pub mod orchestrator;
pub mod prompt;
pub mod store;
pub mod summarizer;
pub mod transcript;

pub use error::{BriefcastError, Result};
