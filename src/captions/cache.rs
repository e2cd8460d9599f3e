//! In-memory TTL cache for raw cue sequences.
//!
//! Entries hold the unfiltered cue sequence for a (video, language) pair and
//! expire a fixed interval after insertion. Reads never refresh the TTL.

use super::Cue;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Default entry lifetime: one hour.
const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Language key used when no language was requested.
const DEFAULT_LANGUAGE_KEY: &str = "default";

struct CacheEntry {
    cues: Vec<Cue>,
    inserted_at: Instant,
}

/// TTL-bounded cue cache keyed by (video id, language).
///
/// Insert-or-replace is atomic per key; concurrent fetches racing to populate
/// the same key resolve last-write-wins. Size is unbounded.
pub struct CueCache {
    entries: RwLock<HashMap<(String, String), CacheEntry>>,
    ttl: Duration,
}

impl CueCache {
    /// Create a cache with the default one hour TTL.
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TTL)
    }

    /// Create a cache with a custom TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    fn key(video_id: &str, language: Option<&str>) -> (String, String) {
        (
            video_id.to_string(),
            language.unwrap_or(DEFAULT_LANGUAGE_KEY).to_string(),
        )
    }

    /// Look up a cue sequence, returning `None` for absent or expired entries.
    pub fn get(&self, video_id: &str, language: Option<&str>) -> Option<Vec<Cue>> {
        let entries = self.entries.read().unwrap();
        let entry = entries.get(&Self::key(video_id, language))?;
        if entry.inserted_at.elapsed() > self.ttl {
            return None;
        }
        Some(entry.cues.clone())
    }

    /// Insert or replace the cue sequence for a (video, language) pair.
    pub fn put(&self, video_id: &str, language: Option<&str>, cues: Vec<Cue>) {
        let mut entries = self.entries.write().unwrap();
        entries.insert(
            Self::key(video_id, language),
            CacheEntry {
                cues,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Number of entries, including ones past their TTL.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    /// Whether the cache holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for CueCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_cues() -> Vec<Cue> {
        vec![
            Cue::new("hello", 0, 1000),
            Cue::new("world", 1000, 1000),
        ]
    }

    #[test]
    fn test_put_and_get() {
        let cache = CueCache::new();
        assert!(cache.get("abc", None).is_none());

        cache.put("abc", None, sample_cues());
        let cues = cache.get("abc", None).unwrap();
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0].text, "hello");
    }

    #[test]
    fn test_language_keys_are_distinct() {
        let cache = CueCache::new();
        cache.put("abc", Some("en"), sample_cues());

        assert!(cache.get("abc", None).is_none());
        assert!(cache.get("abc", Some("de")).is_none());
        assert!(cache.get("abc", Some("en")).is_some());
    }

    #[test]
    fn test_expiry() {
        let cache = CueCache::with_ttl(Duration::from_millis(10));
        cache.put("abc", None, sample_cues());
        assert!(cache.get("abc", None).is_some());

        std::thread::sleep(Duration::from_millis(20));
        assert!(cache.get("abc", None).is_none());
        // The expired entry is still stored, just not served.
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_put_replaces() {
        let cache = CueCache::new();
        cache.put("abc", None, sample_cues());
        cache.put("abc", None, vec![Cue::new("replaced", 0, 500)]);

        let cues = cache.get("abc", None).unwrap();
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].text, "replaced");
    }
}
