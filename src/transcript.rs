//! Transcript extraction heuristic.
//!
//! Podcast feeds carry transcripts (or transcript-length show notes) in
//! inconsistent fields. Extraction scans a fixed priority list and accepts
//! the first field that is still long after markup is stripped. Any
//! sufficiently long descriptive text qualifies; this is a heuristic, not a
//! guarantee of a true transcript.

use regex::Regex;
use std::sync::LazyLock;

use crate::feed::EpisodeItem;

/// A candidate field qualifies only above this many characters, measured
/// both before and after markup stripping.
pub const MIN_TRANSCRIPT_CHARS: usize = 1000;

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

/// Candidate fields in priority order. content:encoded gets a second look
/// after the shorter fields.
fn candidates(item: &EpisodeItem) -> [(&'static str, Option<&str>); 5] {
    [
        ("content:encoded", item.content_encoded.as_deref()),
        ("content", item.content.as_deref()),
        ("description", item.description.as_deref()),
        ("itunes:summary", item.itunes_summary.as_deref()),
        ("content:encoded", item.content_encoded.as_deref()),
    ]
}

/// Extract transcript text from one episode item.
///
/// Returns the first candidate field whose raw length exceeds
/// [`MIN_TRANSCRIPT_CHARS`] and whose length still does after HTML-tag-like
/// substrings are removed and whitespace is trimmed. Returns `None` when no
/// field qualifies, which the processing loop treats as "skip this episode".
pub fn extract_transcript(item: &EpisodeItem) -> Option<String> {
    for (_, candidate) in candidates(item) {
        let Some(raw) = candidate else { continue };
        if raw.chars().count() <= MIN_TRANSCRIPT_CHARS {
            continue;
        }
        let cleaned = HTML_TAG.replace_all(raw, "");
        let cleaned = cleaned.trim();
        if cleaned.chars().count() > MIN_TRANSCRIPT_CHARS {
            return Some(cleaned.to_string());
        }
    }
    None
}

/// Raw character count per distinct candidate field, for diagnostics when
/// an episode has no qualifying transcript.
pub fn candidate_lengths(item: &EpisodeItem) -> Vec<(&'static str, Option<usize>)> {
    candidates(item)
        .into_iter()
        .take(4)
        .map(|(name, value)| (name, value.map(|v| v.chars().count())))
        .collect()
}
