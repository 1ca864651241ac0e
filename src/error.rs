//! Error types for briefcast.

use thiserror::Error;

/// Library-level error type for briefcast operations.
#[derive(Error, Debug)]
pub enum BriefcastError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Feed error: {0}")]
    Feed(String),

    #[error("Anthropic API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Summary extraction failed: {0}")]
    SummaryExtraction(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),
}

/// Result type alias for briefcast operations.
pub type Result<T> = std::result::Result<T, BriefcastError>;
