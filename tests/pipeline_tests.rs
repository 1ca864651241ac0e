mod mocks;

use briefcast::config::{GeneralSettings, MatchStrategy, PodcastConfig, Settings};
use briefcast::feed::{parse_feed, EpisodeItem};
use briefcast::orchestrator::Orchestrator;
use briefcast::store::{EpisodeSummary, SummaryStore};
use briefcast::summarizer::SummaryDocument;
use mocks::{feed_source::MockFeedSource, summarizer::MockSummarizer};
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;

const FEED_URL: &str = "https://feeds.example.com/deep-questions.rss";
const FEED_XML: &str = include_str!("fixtures/feed.xml");

fn long_notes(lead: &str) -> String {
    format!("{} {}", lead, "A dense, insight-heavy conversation. ".repeat(40))
}

fn item(title: &str, notes: Option<String>) -> EpisodeItem {
    EpisodeItem {
        title: Some(title.to_string()),
        pub_date: Some("Mon, 18 Aug 2025 09:00:00 GMT".to_string()),
        audio_url: Some(format!(
            "https://cdn.example.com/{}.mp3",
            title.to_lowercase().replace(' ', "-")
        )),
        description: notes,
        ..Default::default()
    }
}

fn podcast(id: &str, feed_url: &str) -> PodcastConfig {
    PodcastConfig {
        id: id.to_string(),
        name: id.to_string(),
        description: String::new(),
        feed_url: feed_url.to_string(),
        website: None,
    }
}

fn settings_for(podcasts: Vec<PodcastConfig>, store_path: &Path, limit: usize) -> Settings {
    Settings {
        podcasts,
        general: GeneralSettings {
            store_path: store_path.display().to_string(),
            episode_limit: limit,
            ..Default::default()
        },
        ..Default::default()
    }
}

// ─── Limit semantics ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_limit_one_stores_only_first_qualifying_episode() {
    let dir = tempdir().unwrap();
    let store_path = dir.path().join("summaries.json");

    let feed = MockFeedSource::default().with_feed(
        FEED_URL,
        vec![
            item("Episode Three", Some(long_notes("Newest."))),
            item("Episode Two", Some(long_notes("Middle."))),
            item("Episode One", Some(long_notes("Oldest."))),
        ],
    );
    let summarizer = MockSummarizer::default();
    let calls = summarizer.calls.clone();

    let settings = settings_for(vec![podcast("deep-questions", FEED_URL)], &store_path, 1);
    let orchestrator =
        Orchestrator::with_components(settings, Arc::new(feed), Arc::new(summarizer));

    let report = orchestrator.run(None).await.expect("run should succeed");

    assert_eq!(report.new_episodes, 1);
    assert_eq!(report.podcasts_processed, 1);
    assert_eq!(report.podcasts_failed, 0);
    assert_eq!(report.total_episodes, 1);

    // The two remaining items were never considered.
    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "Episode Three");

    let store = SummaryStore::load(&store_path).unwrap();
    let episodes = store.episodes("deep-questions");
    assert_eq!(episodes.len(), 1);
    assert_eq!(episodes[0].title, "Episode Three");
    assert_eq!(episodes[0].summary.one_liner, "Summary of Episode Three");
}

#[tokio::test]
async fn test_limit_override_processes_more_episodes() {
    let dir = tempdir().unwrap();
    let store_path = dir.path().join("summaries.json");

    let feed = MockFeedSource::default().with_feed(
        FEED_URL,
        vec![
            item("Episode Three", Some(long_notes("Newest."))),
            item("Episode Two", Some(long_notes("Middle."))),
            item("Episode One", Some(long_notes("Oldest."))),
        ],
    );
    let summarizer = MockSummarizer::default();

    // Configured limit is 1; the CLI flag overrides it for this run.
    let settings = settings_for(vec![podcast("deep-questions", FEED_URL)], &store_path, 1);
    let orchestrator =
        Orchestrator::with_components(settings, Arc::new(feed), Arc::new(summarizer));

    let report = orchestrator.run(Some(2)).await.expect("run should succeed");
    assert_eq!(report.new_episodes, 2);

    let store = SummaryStore::load(&store_path).unwrap();
    let titles: Vec<_> = store
        .episodes("deep-questions")
        .iter()
        .map(|e| e.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Episode Three", "Episode Two"]);
}

// ─── Dedup ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_second_run_stores_nothing_new() {
    let dir = tempdir().unwrap();
    let store_path = dir.path().join("summaries.json");

    // One qualifying item; the other has no transcript-length text.
    let feed = MockFeedSource::default().with_feed(
        FEED_URL,
        vec![
            item("Interview", Some(long_notes("Interview."))),
            item("Trailer", Some("A one-minute teaser.".to_string())),
        ],
    );
    let summarizer = MockSummarizer::default();
    let calls = summarizer.calls.clone();

    let settings = settings_for(vec![podcast("deep-questions", FEED_URL)], &store_path, 5);
    let orchestrator =
        Orchestrator::with_components(settings, Arc::new(feed), Arc::new(summarizer));

    let first = orchestrator.run(None).await.expect("first run");
    assert_eq!(first.new_episodes, 1);

    let second = orchestrator.run(None).await.expect("second run");
    assert_eq!(second.new_episodes, 0);
    assert_eq!(second.total_episodes, 1);

    // The stored episode was not re-summarized.
    assert_eq!(calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_audio_url_matching_skips_retitled_episode() {
    let dir = tempdir().unwrap();
    let store_path = dir.path().join("summaries.json");

    let pod = podcast("deep-questions", FEED_URL);

    // Already stored under its original title.
    let aired = item("Episode One", Some(long_notes("Original.")));
    let mut store = SummaryStore::default();
    store.append(
        &pod,
        vec![EpisodeSummary::new(&pod, &aired, SummaryDocument::default())],
    );
    store.save(&store_path).unwrap();

    // The feed now carries the same enclosure under an edited title.
    let mut retitled = item("Episode One (remastered)", Some(long_notes("Remaster.")));
    retitled.audio_url = aired.audio_url.clone();

    let feed = MockFeedSource::default().with_feed(FEED_URL, vec![retitled]);
    let summarizer = MockSummarizer::default();
    let calls = summarizer.calls.clone();

    let mut settings = settings_for(vec![pod], &store_path, 1);
    settings.general.match_strategy = MatchStrategy::AudioUrl;

    let orchestrator =
        Orchestrator::with_components(settings, Arc::new(feed), Arc::new(summarizer));
    let report = orchestrator.run(None).await.expect("run should succeed");

    assert_eq!(report.new_episodes, 0);
    assert!(calls.lock().unwrap().is_empty());
    assert_eq!(SummaryStore::load(&store_path).unwrap().total_episodes(), 1);
}

// ─── Failure isolation ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_summarization_failure_does_not_consume_limit_slot() {
    let dir = tempdir().unwrap();
    let store_path = dir.path().join("summaries.json");

    let feed = MockFeedSource::default().with_feed(
        FEED_URL,
        vec![
            item("Episode Three", Some(long_notes("Newest."))),
            item("Episode Two", Some(long_notes("Middle."))),
            item("Episode One", Some(long_notes("Oldest."))),
        ],
    );
    let summarizer = MockSummarizer::failing_for(&["Episode Three"]);
    let calls = summarizer.calls.clone();

    let settings = settings_for(vec![podcast("deep-questions", FEED_URL)], &store_path, 1);
    let orchestrator =
        Orchestrator::with_components(settings, Arc::new(feed), Arc::new(summarizer));

    let report = orchestrator.run(None).await.expect("run should succeed");

    // The failed episode did not count toward the limit; the next one filled it.
    assert_eq!(report.new_episodes, 1);
    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].0, "Episode Three");
    assert_eq!(calls[1].0, "Episode Two");

    let store = SummaryStore::load(&store_path).unwrap();
    assert_eq!(store.episodes("deep-questions")[0].title, "Episode Two");
}

#[tokio::test]
async fn test_feed_failure_skips_podcast_but_not_run() {
    let dir = tempdir().unwrap();
    let store_path = dir.path().join("summaries.json");

    let beta_url = "https://feeds.example.com/beta.rss";
    // Only beta is registered; alpha's fetch fails.
    let feed = MockFeedSource::default()
        .with_feed(beta_url, vec![item("Beta Premiere", Some(long_notes("B.")))]);
    let summarizer = MockSummarizer::default();

    let settings = settings_for(
        vec![
            podcast("alpha", "https://feeds.example.com/alpha.rss"),
            podcast("beta", beta_url),
        ],
        &store_path,
        1,
    );
    let orchestrator =
        Orchestrator::with_components(settings, Arc::new(feed), Arc::new(summarizer));

    let report = orchestrator.run(None).await.expect("run should succeed");

    assert_eq!(report.podcasts_failed, 1);
    assert_eq!(report.podcasts_processed, 1);
    assert_eq!(report.new_episodes, 1);

    let store = SummaryStore::load(&store_path).unwrap();
    assert!(store.podcasts.contains_key("beta"));
    assert!(!store.podcasts.contains_key("alpha"));
}

#[tokio::test]
async fn test_feed_failure_leaves_store_untouched() {
    let dir = tempdir().unwrap();
    let store_path = dir.path().join("summaries.json");

    let feed = MockFeedSource::failing("connection refused");
    let summarizer = MockSummarizer::default();

    let settings = settings_for(vec![podcast("deep-questions", FEED_URL)], &store_path, 1);
    let orchestrator =
        Orchestrator::with_components(settings, Arc::new(feed), Arc::new(summarizer));

    let report = orchestrator.run(None).await.expect("run should succeed");

    assert_eq!(report.podcasts_failed, 1);
    assert_eq!(report.new_episodes, 0);
    // No podcast gained episodes, so no save point was reached.
    assert!(!store_path.exists());
}

#[tokio::test]
async fn test_transcriptless_episodes_are_skipped_without_api_calls() {
    let dir = tempdir().unwrap();
    let store_path = dir.path().join("summaries.json");

    let feed = MockFeedSource::default().with_feed(
        FEED_URL,
        vec![
            item("Short Notes", Some("Nothing substantial here.".to_string())),
            item("No Notes", None),
        ],
    );
    let summarizer = MockSummarizer::default();
    let calls = summarizer.calls.clone();

    let settings = settings_for(vec![podcast("deep-questions", FEED_URL)], &store_path, 3);
    let orchestrator =
        Orchestrator::with_components(settings, Arc::new(feed), Arc::new(summarizer));

    let report = orchestrator.run(None).await.expect("run should succeed");

    assert_eq!(report.new_episodes, 0);
    assert_eq!(report.podcasts_processed, 1);
    assert!(calls.lock().unwrap().is_empty());
    assert!(!store_path.exists());
}

#[tokio::test]
async fn test_unreadable_store_aborts_before_any_fetch() {
    let dir = tempdir().unwrap();
    let store_path = dir.path().join("summaries.json");
    std::fs::write(&store_path, "{ not json").unwrap();

    let feed = MockFeedSource::default()
        .with_feed(FEED_URL, vec![item("Episode", Some(long_notes("E.")))]);
    let fetches = feed.calls.clone();
    let summarizer = MockSummarizer::default();

    let settings = settings_for(vec![podcast("deep-questions", FEED_URL)], &store_path, 1);
    let orchestrator =
        Orchestrator::with_components(settings, Arc::new(feed), Arc::new(summarizer));

    assert!(orchestrator.run(None).await.is_err());
    assert!(fetches.lock().unwrap().is_empty());
}

// ─── Store contents ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_store_file_is_valid_json_keyed_by_configured_podcasts() {
    let dir = tempdir().unwrap();
    let store_path = dir.path().join("summaries.json");

    let alpha_url = "https://feeds.example.com/alpha.rss";
    let beta_url = "https://feeds.example.com/beta.rss";
    let feed = MockFeedSource::default()
        .with_feed(alpha_url, vec![item("Alpha One", Some(long_notes("A.")))])
        .with_feed(beta_url, vec![item("Beta One", Some(long_notes("B.")))]);
    let summarizer = MockSummarizer::default();

    let settings = settings_for(
        vec![podcast("alpha", alpha_url), podcast("beta", beta_url)],
        &store_path,
        1,
    );
    let orchestrator =
        Orchestrator::with_components(settings, Arc::new(feed), Arc::new(summarizer));
    orchestrator.run(None).await.expect("run should succeed");

    let raw = std::fs::read_to_string(&store_path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

    let podcasts = json["podcasts"].as_object().unwrap();
    let keys: Vec<_> = podcasts.keys().collect();
    assert_eq!(keys, vec!["alpha", "beta"]);

    // Each record carries the flattened podcast config plus its episodes.
    assert_eq!(podcasts["alpha"]["feed_url"], alpha_url);
    assert_eq!(podcasts["alpha"]["episodes"][0]["title"], "Alpha One");
    assert_eq!(
        podcasts["beta"]["episodes"][0]["summary"]["one_liner"],
        "Summary of Beta One"
    );
}

#[tokio::test]
async fn test_podcasts_absent_from_config_are_left_untouched() {
    let dir = tempdir().unwrap();
    let store_path = dir.path().join("summaries.json");

    // A podcast that was summarized in the past but is no longer configured.
    let legacy = podcast("legacy", "https://feeds.example.com/legacy.rss");
    let mut store = SummaryStore::default();
    store.append(
        &legacy,
        vec![EpisodeSummary::new(
            &legacy,
            &item("Farewell Episode", None),
            SummaryDocument::default(),
        )],
    );
    store.save(&store_path).unwrap();

    let feed = MockFeedSource::default()
        .with_feed(FEED_URL, vec![item("Fresh Start", Some(long_notes("F.")))]);
    let summarizer = MockSummarizer::default();

    let settings = settings_for(vec![podcast("deep-questions", FEED_URL)], &store_path, 1);
    let orchestrator =
        Orchestrator::with_components(settings, Arc::new(feed), Arc::new(summarizer));
    orchestrator.run(None).await.expect("run should succeed");

    let reloaded = SummaryStore::load(&store_path).unwrap();
    assert_eq!(reloaded.episodes("legacy").len(), 1);
    assert_eq!(reloaded.episodes("legacy")[0].title, "Farewell Episode");
    assert_eq!(reloaded.episodes("deep-questions").len(), 1);
}

// ─── Fixture feed ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_fixture_feed_end_to_end() {
    let items = parse_feed(FEED_XML.as_bytes()).expect("fixture should parse");
    assert_eq!(items.len(), 3);

    let dir = tempdir().unwrap();
    let store_path = dir.path().join("summaries.json");

    let feed = MockFeedSource::default().with_feed(FEED_URL, items);
    let summarizer = MockSummarizer::default();
    let calls = summarizer.calls.clone();

    let settings = settings_for(vec![podcast("deep-questions", FEED_URL)], &store_path, 2);
    let orchestrator =
        Orchestrator::with_components(settings, Arc::new(feed), Arc::new(summarizer));
    let report = orchestrator.run(None).await.expect("run should succeed");

    // The announcement in the middle has no transcript-length text; the
    // episodes around it do.
    assert_eq!(report.new_episodes, 2);
    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].0, "How to Reclaim Your Focus");
    assert_eq!(calls[1].0, "The Deep Life Stack");

    // Markup was stripped before the text reached the summarizer.
    assert!(calls[0].1.chars().count() > 1000);
    assert!(!calls[0].1.contains('<'));
    assert!(calls[0].1.starts_with("Host: I want to start"));

    let store = SummaryStore::load(&store_path).unwrap();
    let episodes = store.episodes("deep-questions");
    assert_eq!(episodes.len(), 2);
    assert_eq!(
        episodes[0].audio_url.as_deref(),
        Some("https://cdn.example.com/dq-ep301.mp3")
    );
    assert_eq!(episodes[0].duration.as_deref(), Some("01:12:40"));
    assert_eq!(
        episodes[0].published_date.as_deref(),
        Some("Mon, 18 Aug 2025 09:00:00 GMT")
    );
}
