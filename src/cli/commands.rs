//! Command implementations for the yttekst CLI.

use crate::cli::{ConfigAction, Output, PipelineFlags};
use crate::config::Settings;
use crate::error::YttekstError;
use crate::ids;
use crate::service::TranscriptService;
use crate::transcript::{
    format_timestamp, OutputFormat, SearchSpec, SegmentMethod, SegmentSpec, TimeRange,
    TranscriptContent, TranscriptOptions,
};
use anyhow::Result;

/// Resolve CLI inputs (URLs or bare IDs) to video IDs.
fn resolve_ids(inputs: &[String]) -> Result<Vec<String>> {
    inputs
        .iter()
        .map(|input| {
            ids::extract_video_id(input).ok_or_else(|| {
                YttekstError::InvalidInput(format!("Not a YouTube video URL or ID: {}", input))
                    .into()
            })
        })
        .collect()
}

/// Build transcript options from flags, falling back to settings defaults.
fn build_options(flags: &PipelineFlags, settings: &Settings) -> Result<TranscriptOptions> {
    let format: OutputFormat = flags
        .format
        .as_deref()
        .unwrap_or(&settings.transcript.format)
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let range = if flags.start.is_some() || flags.end.is_some() {
        Some(TimeRange {
            start: flags.start,
            end: flags.end,
        })
    } else {
        None
    };

    let search = flags.query.as_ref().map(|query| SearchSpec {
        query: query.clone(),
        case_sensitive: flags.case_sensitive,
        context_lines: flags.context.unwrap_or(settings.transcript.context_lines),
    });

    let segments = match flags.segments {
        Some(count) => {
            let method: SegmentMethod = flags
                .method
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))?;
            Some(SegmentSpec { method, count })
        }
        None => None,
    };

    let options = TranscriptOptions {
        language: flags
            .language
            .clone()
            .or_else(|| settings.transcript.language.clone()),
        range,
        search,
        segments,
        format,
        include_metadata: flags.metadata,
    };

    options.validate()?;
    Ok(options)
}

/// Run the get command.
pub async fn run_get(
    inputs: &[String],
    flags: &PipelineFlags,
    json: bool,
    settings: Settings,
) -> Result<()> {
    let video_ids = resolve_ids(inputs)?;
    let options = build_options(flags, &settings)?;
    let service = TranscriptService::from_settings(&settings)?;

    let transcript = service
        .get_enhanced_transcript(&video_ids, &options)
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&transcript)?);
        return Ok(());
    }

    if transcript.is_empty() {
        Output::warning("No transcript content matched the request.");
        return Ok(());
    }

    if let Some(videos) = &transcript.videos {
        Output::header("Videos");
        for video in videos {
            Output::video_info(
                &video.title,
                &video.id,
                &video.channel_title,
                video.duration_seconds,
            );
        }
        println!();
    }

    match &transcript.content {
        TranscriptContent::Text(text) => println!("{}", text),
        structured => println!("{}", serde_json::to_string_pretty(structured)?),
    }

    println!();
    Output::kv("Cues", &transcript.total_segments.to_string());
    Output::kv("Duration", &format_timestamp(transcript.duration_seconds));

    Ok(())
}

/// Run the multi command.
pub async fn run_multi(inputs: &[String], flags: &PipelineFlags, settings: Settings) -> Result<()> {
    let video_ids = resolve_ids(inputs)?;
    let options = build_options(flags, &settings)?;
    let service = TranscriptService::from_settings(&settings)?;

    let results = service.process_multi_video(&video_ids, &options).await?;

    let failures = results.iter().filter(|r| !r.is_success()).count();
    if failures > 0 {
        Output::warning(&format!("{} of {} videos failed", failures, results.len()));
    }

    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}

/// Run the config command.
pub fn run_config(action: &ConfigAction, settings: Settings) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let content = toml::to_string_pretty(&settings)?;
            println!("{}", content);
        }
        ConfigAction::Path => {
            println!("{}", Settings::default_config_path().display());
        }
    }
    Ok(())
}
