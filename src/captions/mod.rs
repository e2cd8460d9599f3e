//! Caption fetching abstraction for yttekst.
//!
//! Provides the cue data model and a trait-based interface for caption
//! sources, so the pipeline can run against the real timedtext endpoint or a
//! test double.

mod cache;
mod timedtext;

pub use cache::CueCache;
pub use timedtext::TimedTextSource;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One timed caption unit.
///
/// Offsets and durations are in milliseconds from the start of the video,
/// as delivered by the caption source. Cues are never mutated after fetch;
/// every pipeline stage produces a new sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cue {
    /// Caption text.
    pub text: String,
    /// Milliseconds from video start.
    pub offset_ms: u64,
    /// Display duration in milliseconds.
    pub duration_ms: u64,
    /// Originating video, set when cues from several videos are combined.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,
}

impl Cue {
    /// Create a new cue.
    pub fn new(text: impl Into<String>, offset_ms: u64, duration_ms: u64) -> Self {
        Self {
            text: text.into(),
            offset_ms,
            duration_ms,
            video_id: None,
        }
    }

    /// End of the cue in milliseconds.
    pub fn end_ms(&self) -> u64 {
        self.offset_ms + self.duration_ms
    }

    /// Start of the cue in seconds.
    pub fn start_seconds(&self) -> f64 {
        self.offset_ms as f64 / 1000.0
    }

    /// End of the cue in seconds.
    pub fn end_seconds(&self) -> f64 {
        self.end_ms() as f64 / 1000.0
    }
}

/// Trait for caption providers.
///
/// Implementations fetch the raw, unfiltered cue sequence for one video and
/// language. Failures distinguish "no captions exist" (`CaptionUnavailable`)
/// from transport or parse problems (`Source`).
#[async_trait]
pub trait CaptionSource: Send + Sync {
    /// Fetch all cues for a video, in chronological order.
    async fn fetch(&self, video_id: &str, language: Option<&str>) -> Result<Vec<Cue>>;
}
