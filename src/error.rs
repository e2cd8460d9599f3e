//! Error types for yttekst.

use thiserror::Error;

/// Library-level error type for yttekst operations.
#[derive(Error, Debug)]
pub enum YttekstError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No captions available for video {0}")]
    CaptionUnavailable(String),

    #[error("Source error for video {video_id}: {message}")]
    Source { video_id: String, message: String },

    #[error("Video metadata not found: {0}")]
    MetadataNotFound(String),

    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl YttekstError {
    /// Wrap a transport or parse failure with the video it occurred on.
    pub fn source_for(video_id: &str, message: impl std::fmt::Display) -> Self {
        YttekstError::Source {
            video_id: video_id.to_string(),
            message: message.to_string(),
        }
    }
}

/// Result type alias for yttekst operations.
pub type Result<T> = std::result::Result<T, YttekstError>;
