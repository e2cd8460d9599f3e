//! Configuration module for yttekst.
//!
//! Handles loading and managing application settings.

mod settings;

pub use settings::{
    CacheSettings, GeneralSettings, Settings, TranscriptSettings, YoutubeSettings,
};
