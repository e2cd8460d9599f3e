//! Caption source backed by YouTube's timedtext endpoint.
//!
//! Scrapes the watch page for the available caption tracks, picks one for the
//! requested language, and parses the track body into cues.

use super::{CaptionSource, Cue};
use crate::error::{Result, YttekstError};
use async_trait::async_trait;
use regex::Regex;
use tracing::debug;
use url::Url;

const WATCH_URL: &str = "https://www.youtube.com/watch";

/// Caption fetcher for YouTube's timedtext tracks.
pub struct TimedTextSource {
    client: reqwest::Client,
    tracks_regex: Regex,
    cue_regex: Regex,
}

impl TimedTextSource {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("yttekst/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to build HTTP client");

        // The player config embeds the track list as a JSON array.
        let tracks_regex =
            Regex::new(r#""captionTracks":(\[.*?\]),""#).expect("Invalid regex");

        // Track bodies are simple XML: <text start="1.3" dur="2.5">...</text>.
        // The dur attribute is occasionally absent.
        let cue_regex = Regex::new(
            r#"(?s)<text start="([\d.]+)"(?: dur="([\d.]+)")?[^>]*>(.*?)</text>"#,
        )
        .expect("Invalid regex");

        Self {
            client,
            tracks_regex,
            cue_regex,
        }
    }

    /// Extract the caption track list from watch page HTML.
    fn extract_tracks(&self, html: &str) -> Option<Vec<serde_json::Value>> {
        let caps = self.tracks_regex.captures(html)?;
        serde_json::from_str(caps.get(1)?.as_str()).ok()
    }

    /// Pick the track for the requested language, or the best default.
    ///
    /// With no language requested, a manually authored track wins over an
    /// auto-generated ("asr") one.
    fn select_track<'a>(
        tracks: &'a [serde_json::Value],
        language: Option<&str>,
    ) -> Option<&'a serde_json::Value> {
        match language {
            Some(lang) => tracks.iter().find(|t| {
                t["languageCode"]
                    .as_str()
                    .is_some_and(|code| code == lang || code.starts_with(&format!("{}-", lang)))
            }),
            None => tracks
                .iter()
                .find(|t| t["kind"].as_str() != Some("asr"))
                .or_else(|| tracks.first()),
        }
    }

    /// Parse a timedtext track body into cues.
    fn parse_cues(&self, video_id: &str, body: &str) -> Result<Vec<Cue>> {
        let mut cues = Vec::new();

        for caps in self.cue_regex.captures_iter(body) {
            let start: f64 = caps[1]
                .parse()
                .map_err(|e| YttekstError::source_for(video_id, format!("bad cue start: {}", e)))?;
            let dur: f64 = match caps.get(2) {
                Some(m) => m.as_str().parse().map_err(|e| {
                    YttekstError::source_for(video_id, format!("bad cue duration: {}", e))
                })?,
                None => 0.0,
            };

            let text = decode_entities(&caps[3]);
            if text.trim().is_empty() {
                continue;
            }

            cues.push(Cue::new(
                text,
                (start * 1000.0).round() as u64,
                (dur * 1000.0).round() as u64,
            ));
        }

        if cues.is_empty() {
            return Err(YttekstError::CaptionUnavailable(video_id.to_string()));
        }

        Ok(cues)
    }
}

impl Default for TimedTextSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CaptionSource for TimedTextSource {
    async fn fetch(&self, video_id: &str, language: Option<&str>) -> Result<Vec<Cue>> {
        let mut watch_url =
            Url::parse(WATCH_URL).map_err(|e| YttekstError::source_for(video_id, e))?;
        watch_url.query_pairs_mut().append_pair("v", video_id);

        let html = self
            .client
            .get(watch_url)
            .send()
            .await
            .map_err(|e| YttekstError::source_for(video_id, e))?
            .error_for_status()
            .map_err(|e| YttekstError::source_for(video_id, e))?
            .text()
            .await
            .map_err(|e| YttekstError::source_for(video_id, e))?;

        let tracks = self
            .extract_tracks(&html)
            .ok_or_else(|| YttekstError::CaptionUnavailable(video_id.to_string()))?;

        let track = Self::select_track(&tracks, language)
            .ok_or_else(|| YttekstError::CaptionUnavailable(video_id.to_string()))?;

        let base_url = track["baseUrl"]
            .as_str()
            .ok_or_else(|| YttekstError::source_for(video_id, "caption track has no baseUrl"))?;
        let track_url =
            Url::parse(base_url).map_err(|e| YttekstError::source_for(video_id, e))?;

        debug!(
            "Fetching caption track {} for {}",
            track["languageCode"].as_str().unwrap_or("?"),
            video_id
        );

        let body = self
            .client
            .get(track_url)
            .send()
            .await
            .map_err(|e| YttekstError::source_for(video_id, e))?
            .error_for_status()
            .map_err(|e| YttekstError::source_for(video_id, e))?
            .text()
            .await
            .map_err(|e| YttekstError::source_for(video_id, e))?;

        self.parse_cues(video_id, &body)
    }
}

/// Decode the HTML entities that appear in timedtext bodies.
fn decode_entities(text: &str) -> String {
    let decoded = text
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'");
    decoded.trim().to_string()
}
