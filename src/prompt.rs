//! Summary prompt construction.

use crate::feed::EpisodeItem;

/// Truncate to at most `max_chars` characters, never splitting a char.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Build the single user-role prompt for one episode.
///
/// Embeds episode metadata, the analytical rubric, the required JSON shape,
/// and the transcript truncated to `max_chars` characters.
pub fn build_summary_prompt(
    podcast_name: &str,
    item: &EpisodeItem,
    transcript: &str,
    max_chars: usize,
) -> String {
    format!(
        r#"You are analyzing a podcast transcript to extract the most valuable insights for busy professionals.

Context:
- Podcast: {podcast}
- Episode: {title}
- Published: {published}

Read this transcript and identify:

1. KEY INSIGHTS (the "aha" moments):
   - Non-obvious ideas that shift thinking
   - Contrarian takes that challenge assumptions
   - Frameworks and mental models
   - Stories that illustrate principles
   - When data/metrics are mentioned, include them naturally to support the insight

2. KEY DATA POINTS & METRICS (if present):
   - Revenue numbers, growth rates, conversion rates
   - Specific dollar amounts, percentages, timeframes
   - User/customer counts and metrics
   - Performance data (CAC, LTV, retention, etc.)
   - For each data point: include the number, context, and why it matters

3. FRAMEWORKS & MENTAL MODELS (if present):
   - Named frameworks or heuristics
   - Decision criteria with specific thresholds
   - Repeatable processes

4. ACTIONABLE TAKEAWAYS:
   - What could someone actually do differently?
   - Be specific when the guest is specific

5. MEMORABLE QUOTES:
   - Lines that capture the essence
   - Include data if it's part of a punchy quote

WRITING STYLE:
- Write like a thoughtful journalist, not a transcription bot
- When guest shares numbers, weave them into the narrative naturally
- If an episode is data-heavy, let that show. If it's philosophy-heavy, that's fine too
- Don't force metrics where they don't exist
- Avoid "the guest mentioned that..." - just tell the story

AVOID:
- Chronological play-by-play ("First they discussed X, then Y...")
- Forcing data points into every insight
- Generic statements ("it's important to...")
- Over-systematizing organic conversations

Think: "What would I tell a smart friend about this episode over coffee?"

Estimated read time: 10-20 minutes depending on density of ideas.

Respond in JSON format with this structure:
{{
  "one_liner": "Single sentence capturing the core insight",
  "estimated_read_time": "15 min",
  "key_insights": [
    {{
      "category": "Product Strategy",
      "title": "Insight title",
      "content": "2-4 paragraphs weaving narrative naturally",
      "data_highlights": ["$0 to $100M ARR", "67% viral growth"],
      "quote": "Optional memorable quote",
      "timestamp": "18:30"
    }}
  ],
  "actionable_takeaways": [
    "Specific, concrete advice"
  ],
  "notable_quotes": [
    {{
      "quote": "The quote text",
      "speaker": "Guest name",
      "timestamp": "34:20"
    }}
  ],
  "topics_discussed": ["Product-Market Fit", "Fundraising"],
  "who_should_listen": "Target audience description"
}}

Transcript:
{transcript}"#,
        podcast = podcast_name,
        title = item.display_title(),
        published = item.pub_date.as_deref().unwrap_or("unknown"),
        transcript = truncate_chars(transcript, max_chars),
    )
}
