//! Briefcast CLI entry point.

use anyhow::Result;
use briefcast::cli::{commands, Cli, Commands};
use briefcast::config::Settings;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // .env first: the API key is read from the environment, not validated
    // upfront.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("briefcast={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    // Ensure the store directory exists
    if let Some(parent) = settings.store_path().parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Execute command
    match &cli.command {
        Commands::Run { limit } => {
            commands::run_pipeline(*limit, settings).await?;
        }

        Commands::Probe { target, summarize } => {
            commands::run_probe(target, *summarize, settings).await?;
        }

        Commands::List => {
            commands::run_list(settings)?;
        }
    }

    Ok(())
}
