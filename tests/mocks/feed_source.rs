use async_trait::async_trait;
use briefcast::error::{BriefcastError, Result};
use briefcast::feed::{EpisodeItem, FeedSource};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Feed source serving canned items per URL, recording every fetch.
#[derive(Default)]
pub struct MockFeedSource {
    feeds: HashMap<String, Vec<EpisodeItem>>,
    pub calls: Arc<Mutex<Vec<String>>>,
    fail_with: Option<String>,
}

impl MockFeedSource {
    pub fn with_feed(mut self, url: &str, items: Vec<EpisodeItem>) -> Self {
        self.feeds.insert(url.to_string(), items);
        self
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Default::default()
        }
    }
}

#[async_trait]
impl FeedSource for MockFeedSource {
    async fn fetch(&self, feed_url: &str) -> Result<Vec<EpisodeItem>> {
        self.calls.lock().unwrap().push(feed_url.to_string());
        if let Some(ref msg) = self.fail_with {
            return Err(BriefcastError::Feed(msg.clone()));
        }
        self.feeds
            .get(feed_url)
            .cloned()
            .ok_or_else(|| BriefcastError::Feed(format!("no mock feed for {}", feed_url)))
    }
}
