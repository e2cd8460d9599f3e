//! Transcript processing pipeline for yttekst.
//!
//! Pure transforms over cue sequences: time-range filtering, text search with
//! context, segmentation, and output formatting. Filters always run against
//! the raw cached cues, in the fixed order time-range, search, segmentation.

mod filter;
mod format;
mod segment;

pub use filter::{apply_filters, filter_search, filter_time_range};
pub use format::{
    format_cues, format_segments, format_timestamp, FormattedTranscript, OutputFormat,
    TranscriptContent,
};
pub use segment::{create_segmenter, EqualSegmenter, PauseSegmenter, Segment, SegmentMethod, Segmenter};

use crate::error::{Result, YttekstError};
use serde::{Deserialize, Serialize};

/// Default number of context cues included around each search match.
pub const DEFAULT_CONTEXT_LINES: usize = 2;

/// Optional time window, in seconds from video start.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimeRange {
    /// Keep cues starting at or after this point.
    pub start: Option<f64>,
    /// Keep cues ending at or before this point.
    pub end: Option<f64>,
}

/// Text search over cue contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSpec {
    /// Substring to search for. Must be non-empty.
    pub query: String,
    /// Match without case folding.
    #[serde(default)]
    pub case_sensitive: bool,
    /// Cues of surrounding context to include per match.
    #[serde(default = "default_context_lines")]
    pub context_lines: usize,
}

fn default_context_lines() -> usize {
    DEFAULT_CONTEXT_LINES
}

impl SearchSpec {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            case_sensitive: false,
            context_lines: DEFAULT_CONTEXT_LINES,
        }
    }
}

/// Segmentation request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SegmentSpec {
    /// How to place segment boundaries.
    pub method: SegmentMethod,
    /// Maximum number of segments to produce.
    pub count: usize,
}

/// Options for one transcript request.
///
/// Constructed per request and read-only afterwards; never shared across
/// requests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptOptions {
    /// Caption language code (e.g. "en"). Source default when unset.
    pub language: Option<String>,
    /// Time window to restrict the transcript to.
    pub range: Option<TimeRange>,
    /// Text search with context.
    pub search: Option<SearchSpec>,
    /// Segmentation of the filtered cues.
    pub segments: Option<SegmentSpec>,
    /// Output representation.
    pub format: OutputFormat,
    /// Attach a metadata snapshot per distinct video.
    pub include_metadata: bool,
}

impl TranscriptOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor for the "just a language code" case.
    pub fn with_language(language: impl Into<String>) -> Self {
        Self {
            language: Some(language.into()),
            ..Self::default()
        }
    }

    /// Reject malformed options before any I/O happens.
    pub fn validate(&self) -> Result<()> {
        if let Some(range) = &self.range {
            if let Some(start) = range.start {
                if start < 0.0 {
                    return Err(YttekstError::InvalidOptions(
                        "time range start must be non-negative".to_string(),
                    ));
                }
            }
            if let Some(end) = range.end {
                if end < 0.0 {
                    return Err(YttekstError::InvalidOptions(
                        "time range end must be non-negative".to_string(),
                    ));
                }
            }
            if let (Some(start), Some(end)) = (range.start, range.end) {
                if start > end {
                    return Err(YttekstError::InvalidOptions(format!(
                        "time range start ({}) is after end ({})",
                        start, end
                    )));
                }
            }
        }

        if let Some(search) = &self.search {
            if search.query.is_empty() {
                return Err(YttekstError::InvalidOptions(
                    "search query must not be empty".to_string(),
                ));
            }
        }

        if let Some(segments) = &self.segments {
            if segments.count == 0 {
                return Err(YttekstError::InvalidOptions(
                    "segment count must be at least 1".to_string(),
                ));
            }
        }

        Ok(())
    }
}
