//! CLI module for yttekst.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Args, Parser, Subcommand};

/// yttekst - YouTube transcripts for LLM clients
///
/// Fetches caption transcripts, filters them by time range or text search,
/// segments them, and renders them for downstream consumption. The name
/// combines "YT" with the Norwegian word for "text."
#[derive(Parser, Debug)]
#[command(name = "yttekst")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch one combined transcript across one or more videos
    Get {
        /// YouTube URLs or video IDs
        #[arg(required = true)]
        inputs: Vec<String>,

        #[command(flatten)]
        flags: PipelineFlags,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Process several videos independently, one result per video
    Multi {
        /// YouTube URLs or video IDs
        #[arg(required = true)]
        inputs: Vec<String>,

        #[command(flatten)]
        flags: PipelineFlags,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Pipeline options shared by the transcript commands.
#[derive(Args, Debug)]
pub struct PipelineFlags {
    /// Caption language code (e.g. "en")
    #[arg(short, long)]
    pub language: Option<String>,

    /// Output format (raw, timestamped, merged)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Keep cues starting at or after this time (seconds)
    #[arg(long)]
    pub start: Option<f64>,

    /// Keep cues ending at or before this time (seconds)
    #[arg(long)]
    pub end: Option<f64>,

    /// Only keep cues matching this text, with surrounding context
    #[arg(short, long)]
    pub query: Option<String>,

    /// Context cues to include around each match
    #[arg(long)]
    pub context: Option<usize>,

    /// Match the query without case folding
    #[arg(long)]
    pub case_sensitive: bool,

    /// Split the transcript into at most this many segments
    #[arg(short, long)]
    pub segments: Option<usize>,

    /// Segmentation method (equal, smart)
    #[arg(long, default_value = "equal")]
    pub method: String,

    /// Attach video metadata to the result
    #[arg(short, long)]
    pub metadata: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}
