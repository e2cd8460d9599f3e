//! Metadata provider backed by the YouTube Data API v3.

use super::{MetadataProvider, VideoMetadata};
use crate::error::{Result, YttekstError};
use async_trait::async_trait;
use regex::Regex;
use tracing::debug;

const VIDEOS_ENDPOINT: &str = "https://www.googleapis.com/youtube/v3/videos";

/// YouTube Data API metadata provider.
///
/// The API key is passed in explicitly; there is no ambient configuration.
pub struct DataApiProvider {
    client: reqwest::Client,
    api_key: String,
    duration_regex: Regex,
}

impl DataApiProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        // ISO 8601 durations as the Data API emits them: PT1H2M3S.
        let duration_regex =
            Regex::new(r"^PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?$").expect("Invalid regex");

        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            duration_regex,
        }
    }

    /// Parse an ISO 8601 duration into seconds.
    fn parse_duration(&self, value: &str) -> Option<u32> {
        let caps = self.duration_regex.captures(value)?;
        let part = |i: usize| {
            caps.get(i)
                .map(|m| m.as_str().parse::<u32>().unwrap_or(0))
                .unwrap_or(0)
        };
        Some(part(1) * 3600 + part(2) * 60 + part(3))
    }

    /// Build a metadata snapshot from one Data API item.
    fn parse_item(&self, item: &serde_json::Value) -> VideoMetadata {
        let snippet = &item["snippet"];
        let statistics = &item["statistics"];

        let published_at = snippet["publishedAt"]
            .as_str()
            .and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
            .map(|d| d.with_timezone(&chrono::Utc));

        let duration_seconds = item["contentDetails"]["duration"]
            .as_str()
            .and_then(|d| self.parse_duration(d));

        // Statistics arrive as strings, not numbers.
        let count = |v: &serde_json::Value| v.as_str().and_then(|s| s.parse::<u64>().ok());

        VideoMetadata {
            id: item["id"].as_str().unwrap_or_default().to_string(),
            title: snippet["title"].as_str().unwrap_or("Unknown Title").to_string(),
            channel_id: snippet["channelId"].as_str().unwrap_or_default().to_string(),
            channel_title: snippet["channelTitle"].as_str().unwrap_or_default().to_string(),
            published_at,
            duration_seconds,
            view_count: count(&statistics["viewCount"]),
            like_count: count(&statistics["likeCount"]),
        }
    }
}

#[async_trait]
impl MetadataProvider for DataApiProvider {
    async fn video_details(&self, video_id: &str) -> Result<Option<VideoMetadata>> {
        debug!("Fetching metadata for {}", video_id);

        let response = self
            .client
            .get(VIDEOS_ENDPOINT)
            .query(&[
                ("part", "snippet,contentDetails,statistics"),
                ("id", video_id),
                ("key", &self.api_key),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(YttekstError::source_for(
                video_id,
                format!(
                    "YouTube Data API returned {}: {}",
                    status,
                    &body[..body.len().min(200)]
                ),
            ));
        }

        let json: serde_json::Value = response.json().await?;

        let item = match json["items"].as_array().and_then(|items| items.first()) {
            Some(item) => item,
            None => return Ok(None),
        };

        Ok(Some(self.parse_item(item)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration() {
        let provider = DataApiProvider::new("test-key");

        assert_eq!(provider.parse_duration("PT4M13S"), Some(253));
        assert_eq!(provider.parse_duration("PT1H2M3S"), Some(3723));
        assert_eq!(provider.parse_duration("PT45S"), Some(45));
        assert_eq!(provider.parse_duration("PT2H"), Some(7200));
        assert_eq!(provider.parse_duration("4m13s"), None);
    }

    #[test]
    fn test_parse_item() {
        let provider = DataApiProvider::new("test-key");
        let item: serde_json::Value = serde_json::from_str(
            r#"{
                "id": "dQw4w9WgXcQ",
                "snippet": {
                    "title": "Test Video",
                    "channelId": "UC123",
                    "channelTitle": "Test Channel",
                    "publishedAt": "2009-10-25T06:57:33Z"
                },
                "contentDetails": {"duration": "PT3M33S"},
                "statistics": {"viewCount": "1000000", "likeCount": "50000"}
            }"#,
        )
        .unwrap();

        let meta = provider.parse_item(&item);
        assert_eq!(meta.id, "dQw4w9WgXcQ");
        assert_eq!(meta.title, "Test Video");
        assert_eq!(meta.channel_title, "Test Channel");
        assert_eq!(meta.duration_seconds, Some(213));
        assert_eq!(meta.view_count, Some(1_000_000));
        assert!(meta.published_at.is_some());
    }

    #[test]
    fn test_parse_item_missing_statistics() {
        let provider = DataApiProvider::new("test-key");
        let item: serde_json::Value = serde_json::from_str(
            r#"{"id": "abc", "snippet": {"title": "Bare"}}"#,
        )
        .unwrap();

        let meta = provider.parse_item(&item);
        assert_eq!(meta.title, "Bare");
        assert_eq!(meta.view_count, None);
        assert_eq!(meta.duration_seconds, None);
    }
}
