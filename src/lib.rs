//! yttekst - YouTube Transcripts for LLM Clients
//!
//! Fetches YouTube caption cues and transforms them through a composable
//! filter pipeline into representations an LLM client can consume directly.
//!
//! The name combines "YT" with the Norwegian word for "text."
//!
//! # Overview
//!
//! yttekst allows you to:
//! - Fetch raw caption cues for a video, with TTL caching
//! - Restrict a transcript to a time window
//! - Search transcript text with surrounding context
//! - Segment a transcript into equal time windows or at natural pauses
//! - Render raw, timestamped, or merged output, optionally with metadata
//! - Process many videos at once with per-video error isolation
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `captions` - Cue model, caption source abstraction, and TTL cache
//! - `metadata` - Video metadata abstraction
//! - `transcript` - The pure filter, segmentation, and formatting pipeline
//! - `service` - Request coordination across one or more videos
//! - `ids` - Video ID parsing helpers
//!
//! # Example
//!
//! ```rust,no_run
//! use yttekst::config::Settings;
//! use yttekst::service::TranscriptService;
//! use yttekst::transcript::TranscriptOptions;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let service = TranscriptService::from_settings(&settings)?;
//!
//!     let options = TranscriptOptions::with_language("en");
//!     let ids = vec!["dQw4w9WgXcQ".to_string()];
//!     let transcript = service.get_enhanced_transcript(&ids, &options).await?;
//!     println!("{} cues", transcript.total_segments);
//!
//!     Ok(())
//! }
//! ```

pub mod captions;
pub mod cli;
pub mod config;
pub mod error;
pub mod ids;
pub mod metadata;
pub mod service;
pub mod transcript;

pub use error::{Result, YttekstError};
