//! Run command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use anyhow::Result;

/// Run the full fetch/summarize pipeline over every configured podcast.
pub async fn run_pipeline(limit: Option<usize>, settings: Settings) -> Result<()> {
    if settings.podcasts.is_empty() {
        Output::warning("No podcasts configured. Add [[podcasts]] entries to briefcast.toml.");
        return Ok(());
    }

    Output::info(&format!(
        "Processing {} podcast(s)",
        settings.podcasts.len()
    ));

    let orchestrator = Orchestrator::new(settings)?;
    let report = orchestrator.run(limit).await?;

    println!();
    if report.new_episodes == 0 {
        Output::info("No new episodes summarized");
    } else {
        Output::success(&format!(
            "Summarized {} new episode(s)",
            report.new_episodes
        ));
    }
    if report.podcasts_failed > 0 {
        Output::warning(&format!(
            "{} podcast feed(s) could not be fetched",
            report.podcasts_failed
        ));
    }
    Output::kv("Total episodes stored", &report.total_episodes.to_string());

    Ok(())
}
