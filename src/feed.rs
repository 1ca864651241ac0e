//! Feed fetching and parsing.
//!
//! Fetches a podcast feed over HTTP and parses it into [`EpisodeItem`]s with
//! a single streaming pass. Handles both RSS (`<item>`) and Atom (`<entry>`)
//! documents and keeps the raw descriptive text fields that transcript
//! extraction later scans.

use async_trait::async_trait;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use crate::error::{BriefcastError, Result};

/// One entry parsed out of a podcast feed. Exists only during one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EpisodeItem {
    /// Episode title.
    pub title: Option<String>,
    /// Publish date, verbatim from the feed (`pubDate`/`published`).
    pub pub_date: Option<String>,
    /// Enclosure URL (the audio file).
    pub audio_url: Option<String>,
    /// Duration, verbatim from `itunes:duration`.
    pub duration: Option<String>,
    /// Raw `content:encoded` body.
    pub content_encoded: Option<String>,
    /// Raw `content` body.
    pub content: Option<String>,
    /// Raw `description` body.
    pub description: Option<String>,
    /// Raw `itunes:summary` (or Atom `summary`) body.
    pub itunes_summary: Option<String>,
}

impl EpisodeItem {
    /// Title for console output; feeds occasionally omit one.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("(untitled)")
    }
}

/// Source of feed items, behind a trait so the pipeline can be tested
/// without network access.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch and parse one feed into items, in document order.
    async fn fetch(&self, feed_url: &str) -> Result<Vec<EpisodeItem>>;
}

/// Fetches feeds over HTTPS and parses them with quick-xml.
pub struct HttpFeedSource {
    client: reqwest::Client,
}

impl HttpFeedSource {
    /// Create a feed source with its own HTTP client.
    ///
    /// The client carries a User-Agent (some podcast CDNs reject anonymous
    /// requests) and no timeout: a hung fetch blocks the run.
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("briefcast/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch(&self, feed_url: &str) -> Result<Vec<EpisodeItem>> {
        let response = self.client.get(feed_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(BriefcastError::Feed(format!(
                "{} returned HTTP {}",
                feed_url, status
            )));
        }

        let body = response.bytes().await?;
        let items = parse_feed(&body)?;
        debug!("Parsed {} items from {}", items.len(), feed_url);
        Ok(items)
    }
}

/// The per-item text fields the parser recognizes.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Field {
    Title,
    Description,
    ContentEncoded,
    Content,
    ItunesSummary,
    PubDate,
    Duration,
}

impl Field {
    fn from_name(name: &[u8]) -> Option<Self> {
        match name {
            b"title" => Some(Field::Title),
            b"description" => Some(Field::Description),
            b"content:encoded" => Some(Field::ContentEncoded),
            b"content" => Some(Field::Content),
            b"itunes:summary" | b"summary" => Some(Field::ItunesSummary),
            b"pubDate" | b"published" => Some(Field::PubDate),
            b"itunes:duration" => Some(Field::Duration),
            _ => None,
        }
    }
}

/// Parse an RSS or Atom document into episode items, in document order.
///
/// Unknown elements are ignored; a document with zero items is a valid
/// empty feed. Text fields are only captured inside an item, so
/// channel-level elements (`<image><title>`, the channel title) never
/// bleed into episodes.
pub fn parse_feed(bytes: &[u8]) -> Result<Vec<EpisodeItem>> {
    let mut reader = Reader::from_reader(bytes);
    reader.config_mut().trim_text(true);

    let mut items = Vec::new();
    let mut current: Option<EpisodeItem> = None;
    let mut field: Option<Field> = None;
    let mut text = String::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"item" | b"entry" => {
                    current = Some(EpisodeItem::default());
                    field = None;
                    text.clear();
                }
                b"enclosure" => {
                    if let Some(item) = current.as_mut() {
                        capture_enclosure(&e, &reader, item)?;
                    }
                }
                b"link" => {
                    if let Some(item) = current.as_mut() {
                        capture_atom_enclosure(&e, &reader, item)?;
                    }
                }
                name => {
                    if current.is_some() {
                        if let Some(f) = Field::from_name(name) {
                            field = Some(f);
                            text.clear();
                        }
                    }
                }
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"enclosure" => {
                    if let Some(item) = current.as_mut() {
                        capture_enclosure(&e, &reader, item)?;
                    }
                }
                b"link" => {
                    if let Some(item) = current.as_mut() {
                        capture_atom_enclosure(&e, &reader, item)?;
                    }
                }
                _ => {}
            },
            Event::Text(t) => {
                if field.is_some() {
                    text.push_str(&t.unescape().map_err(quick_xml::Error::from)?);
                }
            }
            Event::CData(t) => {
                if field.is_some() {
                    text.push_str(&String::from_utf8_lossy(&t.into_inner()));
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"item" | b"entry" => {
                    if let Some(item) = current.take() {
                        items.push(item);
                    }
                    field = None;
                    text.clear();
                }
                name => {
                    if let (Some(item), Some(f)) = (current.as_mut(), Field::from_name(name)) {
                        if field == Some(f) {
                            commit_field(item, f, std::mem::take(&mut text));
                            field = None;
                        }
                    }
                }
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(items)
}

fn commit_field(item: &mut EpisodeItem, field: Field, text: String) {
    if text.is_empty() {
        return;
    }
    match field {
        Field::Title => item.title = Some(text),
        Field::Description => item.description = Some(text),
        Field::ContentEncoded => item.content_encoded = Some(text),
        Field::Content => item.content = Some(text),
        Field::ItunesSummary => item.itunes_summary = Some(text),
        Field::PubDate => item.pub_date = Some(text),
        Field::Duration => item.duration = Some(text),
    }
}

/// Take the `url` attribute of an RSS `<enclosure>`; the first one wins.
fn capture_enclosure<R>(
    e: &BytesStart<'_>,
    reader: &Reader<R>,
    item: &mut EpisodeItem,
) -> Result<()> {
    if item.audio_url.is_some() {
        return Ok(());
    }
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == b"url" {
            let value = attr
                .decode_and_unescape_value(reader.decoder())
                .map_err(quick_xml::Error::from)?;
            if !value.is_empty() {
                item.audio_url = Some(value.into_owned());
            }
            break;
        }
    }
    Ok(())
}

/// Take the `href` of an Atom `<link rel="enclosure">`; other rels are
/// page links, not audio.
fn capture_atom_enclosure<R>(
    e: &BytesStart<'_>,
    reader: &Reader<R>,
    item: &mut EpisodeItem,
) -> Result<()> {
    if item.audio_url.is_some() {
        return Ok(());
    }
    let mut rel = None;
    let mut href = None;
    for attr in e.attributes().flatten() {
        let value = attr
            .decode_and_unescape_value(reader.decoder())
            .map_err(quick_xml::Error::from)?;
        match attr.key.as_ref() {
            b"rel" => rel = Some(value.into_owned()),
            b"href" => href = Some(value.into_owned()),
            _ => {}
        }
    }
    if rel.as_deref() == Some("enclosure") {
        if let Some(href) = href {
            if !href.is_empty() {
                item.audio_url = Some(href);
            }
        }
    }
    Ok(())
}
