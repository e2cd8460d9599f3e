//! Video metadata abstraction for yttekst.
//!
//! Metadata is a denormalized snapshot fetched once per video per request and
//! attached to transcript output on demand. It is not cached here; only raw
//! cues are cached.

mod youtube;

pub use youtube::DataApiProvider;

use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of a video's public metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoMetadata {
    /// Video ID.
    pub id: String,
    /// Video title.
    pub title: String,
    /// Channel ID.
    pub channel_id: String,
    /// Channel title.
    pub channel_title: String,
    /// Publication date (if available).
    pub published_at: Option<DateTime<Utc>>,
    /// Duration in seconds (if known).
    pub duration_seconds: Option<u32>,
    /// View count (if exposed).
    pub view_count: Option<u64>,
    /// Like count (if exposed).
    pub like_count: Option<u64>,
}

/// Trait for video metadata providers.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Look up a video's metadata. `None` means the video does not exist or
    /// is not visible (deleted, private).
    async fn video_details(&self, video_id: &str) -> Result<Option<VideoMetadata>>;
}
