//! CLI module for briefcast.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Briefcast - Podcast Episode Summaries
///
/// Fetches podcast RSS feeds, extracts transcript-length show notes, and
/// writes structured episode summaries to a local JSON store.
#[derive(Parser, Debug)]
#[command(name = "briefcast")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch all configured feeds and summarize new episodes
    Run {
        /// Maximum new episodes to summarize per podcast this run
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Dry-run one feed's latest episode without touching the store
    Probe {
        /// Configured podcast id, or a feed URL
        target: String,

        /// Also generate a summary for the latest episode
        #[arg(short, long)]
        summarize: bool,
    },

    /// List configured podcasts and their stored summaries
    List,
}
