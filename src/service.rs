//! Transcript service for yttekst.
//!
//! Coordinates caption fetching, caching, filtering, and formatting across
//! one or more videos. Single-video operations raise; multi-video processing
//! isolates failures per video and always yields one entry per input ID.

use crate::captions::{CaptionSource, Cue, CueCache, TimedTextSource};
use crate::config::Settings;
use crate::error::{Result, YttekstError};
use crate::metadata::{DataApiProvider, MetadataProvider, VideoMetadata};
use crate::transcript::{
    apply_filters, create_segmenter, format_cues, format_segments, FormattedTranscript,
    TranscriptOptions,
};
use futures::future;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// The main transcript service.
pub struct TranscriptService {
    captions: Arc<dyn CaptionSource>,
    metadata: Arc<dyn MetadataProvider>,
    cache: CueCache,
}

impl TranscriptService {
    /// Create a service with the default collaborators, configured from
    /// settings. The Data API key must be configured or exported as
    /// `YOUTUBE_API_KEY`.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = settings
            .youtube
            .api_key
            .clone()
            .or_else(|| std::env::var("YOUTUBE_API_KEY").ok())
            .ok_or_else(|| {
                YttekstError::Config(
                    "YouTube Data API key is not set. Add youtube.api_key to the config \
                     file or set YOUTUBE_API_KEY."
                        .to_string(),
                )
            })?;

        Ok(Self::with_components(
            Arc::new(TimedTextSource::new()),
            Arc::new(DataApiProvider::new(api_key)),
            CueCache::with_ttl(Duration::from_secs(settings.cache.ttl_seconds)),
        ))
    }

    /// Create a service with custom collaborators.
    pub fn with_components(
        captions: Arc<dyn CaptionSource>,
        metadata: Arc<dyn MetadataProvider>,
        cache: CueCache,
    ) -> Self {
        Self {
            captions,
            metadata,
            cache,
        }
    }

    /// Fetch the raw cue sequence for one video, serving from the cache when
    /// a fresh entry exists.
    #[instrument(skip(self))]
    pub async fn get_transcript(
        &self,
        video_id: &str,
        language: Option<&str>,
    ) -> Result<Vec<Cue>> {
        if let Some(cues) = self.cache.get(video_id, language) {
            debug!("Cache hit for {} ({} cues)", video_id, cues.len());
            return Ok(cues);
        }

        let cues = self.captions.fetch(video_id, language).await?;
        info!("Fetched {} cues for {}", cues.len(), video_id);

        // Only complete fetches reach the cache; a cancelled request drops
        // here without a partial write.
        self.cache.put(video_id, language, cues.clone());
        Ok(cues)
    }

    /// Produce one combined, filtered, formatted transcript across one or
    /// more videos. Any failing video fails the whole request; use
    /// [`process_multi_video`](Self::process_multi_video) for per-video
    /// isolation.
    #[instrument(skip(self, options), fields(videos = video_ids.len()))]
    pub async fn get_enhanced_transcript(
        &self,
        video_ids: &[String],
        options: &TranscriptOptions,
    ) -> Result<FormattedTranscript> {
        options.validate()?;
        if video_ids.is_empty() {
            return Err(YttekstError::InvalidOptions(
                "at least one video id is required".to_string(),
            ));
        }

        let language = options.language.as_deref();
        let fetched = future::join_all(
            video_ids
                .iter()
                .map(|id| self.get_transcript(id, language)),
        )
        .await;

        // Concatenate in caller-supplied order; with several videos each cue
        // is tagged with its origin.
        let tag = video_ids.len() > 1;
        let mut combined = Vec::new();
        for (video_id, result) in video_ids.iter().zip(fetched) {
            let mut cues = result?;
            if tag {
                for cue in &mut cues {
                    cue.video_id = Some(video_id.clone());
                }
            }
            combined.extend(cues);
        }

        let filtered = apply_filters(combined, options);
        let mut formatted = self.format_filtered(filtered, options);

        if options.include_metadata {
            formatted = formatted.with_videos(self.fetch_metadata(video_ids).await);
        }

        Ok(formatted)
    }

    /// Process several videos independently. The result always has exactly
    /// one entry per input ID, each a success or an error payload; one
    /// video's failure never aborts the others.
    #[instrument(skip(self, options), fields(videos = video_ids.len()))]
    pub async fn process_multi_video(
        &self,
        video_ids: &[String],
        options: &TranscriptOptions,
    ) -> Result<Vec<PerVideoResult>> {
        options.validate()?;

        let results =
            future::join_all(video_ids.iter().map(|id| self.process_one(id, options))).await;
        Ok(results)
    }

    /// Process one video for the multi-video path, converting failures into
    /// an error payload.
    async fn process_one(&self, video_id: &str, options: &TranscriptOptions) -> PerVideoResult {
        let meta = match self.metadata.video_details(video_id).await {
            Ok(Some(meta)) => meta,
            Ok(None) => {
                return PerVideoResult::failed(video_id, "video not found");
            }
            Err(e) => {
                warn!("Metadata lookup failed for {}: {}", video_id, e);
                return PerVideoResult::failed(video_id, format!("metadata lookup failed: {}", e));
            }
        };

        let cues = match self
            .get_transcript(video_id, options.language.as_deref())
            .await
        {
            Ok(cues) if cues.is_empty() => {
                return PerVideoResult::failed(video_id, "no transcript available");
            }
            Ok(cues) => cues,
            Err(YttekstError::CaptionUnavailable(_)) => {
                return PerVideoResult::failed(video_id, "no transcript available");
            }
            Err(e) => {
                return PerVideoResult::failed(video_id, format!("transcript fetch failed: {}", e));
            }
        };

        let filtered = apply_filters(cues, options);
        let transcript = self.format_filtered(filtered, options);

        PerVideoResult {
            video_id: video_id.to_string(),
            metadata: options.include_metadata.then_some(meta),
            transcript: Some(transcript),
            error: None,
        }
    }

    /// Terminal pipeline stage: segment when requested, then format.
    fn format_filtered(&self, cues: Vec<Cue>, options: &TranscriptOptions) -> FormattedTranscript {
        match &options.segments {
            Some(spec) => {
                let segments = create_segmenter(spec.method).segment(&cues, spec.count);
                format_segments(segments, options.format)
            }
            None => format_cues(cues, options.format),
        }
    }

    /// Fetch metadata snapshots for the distinct video IDs, in request
    /// order. Videos without findable metadata are omitted rather than
    /// failing the request.
    async fn fetch_metadata(&self, video_ids: &[String]) -> Vec<VideoMetadata> {
        let mut distinct: Vec<&String> = Vec::new();
        for id in video_ids {
            if !distinct.contains(&id) {
                distinct.push(id);
            }
        }

        let lookups =
            future::join_all(distinct.iter().map(|id| self.metadata.video_details(id))).await;

        distinct
            .into_iter()
            .zip(lookups)
            .filter_map(|(id, result)| match result {
                Ok(Some(meta)) => Some(meta),
                Ok(None) => {
                    debug!("No metadata for {}", id);
                    None
                }
                Err(e) => {
                    warn!("Metadata lookup failed for {}: {}", id, e);
                    None
                }
            })
            .collect()
    }
}

/// Outcome of processing one video in a multi-video request.
#[derive(Debug, Clone, Serialize)]
pub struct PerVideoResult {
    /// Input video ID.
    pub video_id: String,
    /// Metadata snapshot, when requested and found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<VideoMetadata>,
    /// Formatted transcript on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<FormattedTranscript>,
    /// Failure description; `None` on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PerVideoResult {
    fn failed(video_id: &str, error: impl Into<String>) -> Self {
        Self {
            video_id: video_id.to_string(),
            metadata: None,
            transcript: None,
            error: Some(error.into()),
        }
    }

    /// Whether this entry carries a transcript payload.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}
