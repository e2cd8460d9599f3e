//! Transcript output rendering.
//!
//! Renders a cue sequence or segment set into the raw, timestamped, or
//! merged representation, with uniform timestamp and duration conventions.

use super::segment::Segment;
use crate::captions::Cue;
use crate::metadata::VideoMetadata;
use serde::Serialize;

/// Supported output representations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Cue or segment structure as data, no text rendering.
    Raw,
    /// One `[MM:SS] text` line per cue.
    #[default]
    Timestamped,
    /// Cue texts joined by single spaces, no timestamps.
    Merged,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "raw" => Ok(OutputFormat::Raw),
            "timestamped" => Ok(OutputFormat::Timestamped),
            "merged" => Ok(OutputFormat::Merged),
            _ => Err(format!(
                "Unknown format: {}. Use raw, timestamped, or merged.",
                s
            )),
        }
    }
}

impl<'de> serde::Deserialize<'de> for OutputFormat {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Rendered transcript payload.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum TranscriptContent {
    /// Flat cue structure (`raw`, unsegmented).
    Cues(Vec<Cue>),
    /// Segment structure (`raw`, segmented).
    Segments(Vec<Segment>),
    /// Rendered text (`timestamped` or `merged`).
    Text(String),
}

/// A formatted transcript ready for delivery.
#[derive(Debug, Clone, Serialize)]
pub struct FormattedTranscript {
    /// Representation tag.
    pub format: OutputFormat,
    /// Number of cues included.
    pub total_segments: usize,
    /// Span in seconds: end of last cue minus start of first cue.
    pub duration_seconds: f64,
    /// The rendered payload.
    pub content: TranscriptContent,
    /// Metadata snapshots, one per distinct video, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub videos: Option<Vec<VideoMetadata>>,
}

impl FormattedTranscript {
    /// Attach metadata snapshots.
    pub fn with_videos(mut self, videos: Vec<VideoMetadata>) -> Self {
        self.videos = Some(videos);
        self
    }

    /// Whether any cue survived filtering. Callers report "no matches" on an
    /// empty transcript rather than falling back to unfiltered content.
    pub fn is_empty(&self) -> bool {
        self.total_segments == 0
    }
}

/// Format a flat cue sequence.
pub fn format_cues(cues: Vec<Cue>, format: OutputFormat) -> FormattedTranscript {
    let duration_seconds = span_seconds(cues.first(), cues.last());
    let total_segments = cues.len();

    let content = match format {
        OutputFormat::Raw => TranscriptContent::Cues(cues),
        OutputFormat::Timestamped => TranscriptContent::Text(render_timestamped(&cues)),
        OutputFormat::Merged => TranscriptContent::Text(render_merged(&cues)),
    };

    FormattedTranscript {
        format,
        total_segments,
        duration_seconds,
        content,
        videos: None,
    }
}

/// Format a segmented transcript.
pub fn format_segments(segments: Vec<Segment>, format: OutputFormat) -> FormattedTranscript {
    let total_segments = segments.iter().map(|s| s.cues.len()).sum();
    let duration_seconds = match (segments.first(), segments.last()) {
        (Some(first), Some(last)) => (last.end_ms.saturating_sub(first.start_ms)) as f64 / 1000.0,
        _ => 0.0,
    };

    let content = match format {
        OutputFormat::Raw => TranscriptContent::Segments(segments),
        OutputFormat::Timestamped => {
            TranscriptContent::Text(render_segments(&segments, render_timestamped))
        }
        OutputFormat::Merged => TranscriptContent::Text(render_segments(&segments, render_merged)),
    };

    FormattedTranscript {
        format,
        total_segments,
        duration_seconds,
        content,
        videos: None,
    }
}

fn span_seconds(first: Option<&Cue>, last: Option<&Cue>) -> f64 {
    match (first, last) {
        (Some(first), Some(last)) => {
            (last.end_ms().saturating_sub(first.offset_ms)) as f64 / 1000.0
        }
        _ => 0.0,
    }
}

/// Render each cue as a `[MM:SS] text` line.
fn render_timestamped(cues: &[Cue]) -> String {
    cues.iter()
        .map(|cue| format!("[{}] {}", format_timestamp(cue.start_seconds()), cue.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Concatenate cue texts with single spaces.
fn render_merged(cues: &[Cue]) -> String {
    cues.iter()
        .map(|cue| cue.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render segments with a boundary header each, separated by blank lines.
fn render_segments(segments: &[Segment], render: fn(&[Cue]) -> String) -> String {
    segments
        .iter()
        .map(|segment| {
            format!(
                "Segment {} - {}\n{}",
                segment.start_label(),
                segment.end_label(),
                render(&segment.cues)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Format seconds as MM:SS or HH:MM:SS.
pub fn format_timestamp(seconds: f64) -> String {
    let total_seconds = seconds as u32;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}
