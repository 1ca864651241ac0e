pub mod feed_source;
pub mod summarizer;
