//! List command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::store::SummaryStore;
use anyhow::Result;

/// Show configured podcasts with their stored episode counts.
pub fn run_list(settings: Settings) -> Result<()> {
    if settings.podcasts.is_empty() {
        Output::info("No podcasts configured. Add [[podcasts]] entries to briefcast.toml.");
        return Ok(());
    }

    let store = SummaryStore::load(&settings.store_path())?;

    Output::header(&format!("Configured podcasts ({})", settings.podcasts.len()));
    println!();

    for podcast in &settings.podcasts {
        let episodes = store.episodes(&podcast.id);
        let last_processed = episodes
            .iter()
            .map(|e| e.processed_at)
            .max()
            .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string());
        Output::podcast_row(
            &podcast.name,
            &podcast.id,
            episodes.len(),
            last_processed.as_deref(),
        );
    }

    println!();
    Output::kv("Total episodes stored", &store.total_episodes().to_string());

    Ok(())
}
