//! Probe command implementation.
//!
//! A store-less dry run against one feed: fetch it, try transcript
//! extraction on the latest item, and optionally summarize it once.
//! Nothing is written.

use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::Orchestrator;
use crate::prompt::truncate_chars;
use crate::transcript::{candidate_lengths, extract_transcript};
use anyhow::Result;

/// Run the probe command against a configured podcast id or a feed URL.
pub async fn run_probe(target: &str, summarize: bool, settings: Settings) -> Result<()> {
    let (feed_url, podcast_name) = match settings.podcast(target) {
        Some(p) => (p.feed_url.clone(), p.name.clone()),
        None if target.starts_with("http://") || target.starts_with("https://") => {
            (target.to_string(), target.to_string())
        }
        None => {
            Output::error(&format!(
                "'{}' is not a configured podcast id or a feed URL",
                target
            ));
            return Err(anyhow::anyhow!("unknown probe target: {}", target));
        }
    };

    let orchestrator = Orchestrator::new(settings)?;

    Output::info(&format!("Fetching feed: {}", feed_url));
    let items = orchestrator.feed_source().fetch(&feed_url).await?;
    if items.is_empty() {
        Output::warning("Feed has no items");
        return Ok(());
    }

    let latest = &items[0];
    Output::kv("Items", &items.len().to_string());
    Output::kv("Latest", latest.display_title());

    let Some(transcript) = extract_transcript(latest) else {
        Output::warning("No transcript-length text in the latest episode");
        Output::header("Candidate fields");
        for (field, len) in candidate_lengths(latest) {
            let value = match len {
                Some(n) => format!("{} chars", n),
                None => "none".to_string(),
            };
            Output::kv(field, &value);
        }
        return Ok(());
    };

    Output::success(&format!(
        "Transcript found ({} chars)",
        transcript.chars().count()
    ));
    println!("{}", "-".repeat(50));
    println!("{}", truncate_chars(&transcript, 500));
    println!("{}", "-".repeat(50));

    if !summarize {
        Output::info("Run with --summarize to generate a summary for this episode");
        return Ok(());
    }

    let spinner = Output::spinner("Generating summary...");
    let result = orchestrator
        .summarizer()
        .summarize(&podcast_name, latest, &transcript)
        .await;
    spinner.finish_and_clear();

    match result {
        Ok(summary) => {
            Output::success("Summary generated");
            Output::kv("One-liner", &summary.one_liner);
            Output::kv("Read time", &summary.estimated_read_time);
            Output::kv("Insights", &summary.key_insights.len().to_string());
            Output::kv("Takeaways", &summary.actionable_takeaways.len().to_string());
            Output::kv("Quotes", &summary.notable_quotes.len().to_string());

            if let Some(first) = summary.key_insights.first() {
                Output::header(&format!("[{}] {}", first.category, first.title));
                println!("{}...", truncate_chars(&first.content, 300));
            }
        }
        Err(e) => {
            Output::error(&format!("Summarization failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
