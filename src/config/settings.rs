//! Configuration settings for yttekst.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub youtube: YoutubeSettings,
    pub cache: CacheSettings,
    pub transcript: TranscriptSettings,
}


/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// YouTube-specific settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct YoutubeSettings {
    /// YouTube Data API key, used for metadata lookups. Falls back to the
    /// YOUTUBE_API_KEY environment variable when unset.
    pub api_key: Option<String>,
}


/// Cue cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Entry lifetime in seconds, fixed from insertion.
    pub ttl_seconds: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self { ttl_seconds: 3600 }
    }
}

/// Default transcript request options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptSettings {
    /// Default caption language (source default when unset).
    pub language: Option<String>,
    /// Default output format (raw, timestamped, merged).
    pub format: String,
    /// Default context cues around search matches.
    pub context_lines: usize,
}

impl Default for TranscriptSettings {
    fn default() -> Self {
        Self {
            language: None,
            format: "timestamped".to_string(),
            context_lines: crate::transcript::DEFAULT_CONTEXT_LINES,
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to the default configuration file.
    pub fn save(&self) -> crate::error::Result<()> {
        self.save_to(&Self::default_config_path())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::YttekstError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("yttekst")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.cache.ttl_seconds, 3600);
        assert_eq!(settings.transcript.format, "timestamped");
        assert!(settings.youtube.api_key.is_none());
    }

    #[test]
    fn test_partial_toml() {
        let settings: Settings = toml::from_str(
            r#"
            [youtube]
            api_key = "key-123"

            [cache]
            ttl_seconds = 60
            "#,
        )
        .unwrap();

        assert_eq!(settings.youtube.api_key.as_deref(), Some("key-123"));
        assert_eq!(settings.cache.ttl_seconds, 60);
        // Untouched sections keep their defaults.
        assert_eq!(settings.general.log_level, "info");
    }
}
