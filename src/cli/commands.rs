//! CLI command implementations

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::cli::args::ConfigCommand;
use crate::config::Settings;
use crate::languages::{Language, SummaryFormat, LANGUAGE_CODES};
use crate::llm::SummaryGenerator;
use crate::pipeline::{NotesPipeline, NotesRequest};
use crate::transcript::{extract_video_id, TranscriptFetcher, YoutubeCaptionService};

/// Build a transcript fetcher backed by YouTube
fn build_fetcher(settings: &Settings) -> Result<TranscriptFetcher> {
    let service = YoutubeCaptionService::from_settings(&settings.transcript)?;
    Ok(TranscriptFetcher::new(
        Box::new(service),
        settings.transcript.default_language.clone(),
    ))
}

/// Fetch a transcript, summarize it and optionally save the summary
pub async fn summarize_video(
    settings: &Settings,
    url: &str,
    format: SummaryFormat,
    language: Language,
    output: Option<Option<PathBuf>>,
) -> Result<()> {
    // Fail on missing credentials before any network traffic.
    let generator = SummaryGenerator::from_settings(settings)?;
    let fetcher = build_fetcher(settings)?;
    let mut pipeline = NotesPipeline::new(fetcher, generator);

    let request = NotesRequest {
        video_url: url.to_string(),
        format,
        language,
    };

    let outcome = pipeline.run(&request).await?;

    println!("Detailed Notes ({}, {}):", format.label(), language.label());
    println!();
    println!("{}", outcome.summary);

    if let Some(path) = output {
        let path = path.unwrap_or_else(|| PathBuf::from(&settings.output.file_name));
        write_summary(&path, outcome.summary.as_str())?;
        println!();
        println!("Summary saved to: {}", path.display());
    }

    Ok(())
}

/// Print the flattened transcript of a video
pub async fn print_transcript(settings: &Settings, url: &str, language: Language) -> Result<()> {
    let fetcher = build_fetcher(settings)?;
    let transcript = fetcher.fetch(url, language.code()).await?;

    println!("{}", transcript);
    Ok(())
}

/// Show the watch and thumbnail links for a video
pub fn show_preview(url: &str) -> Result<()> {
    let video_id = extract_video_id(url)?;

    println!("Video ID: {}", video_id);
    println!("Watch: {}", video_id.watch_url());
    println!("Thumbnail: {}", video_id.thumbnail_url());
    Ok(())
}

/// List the supported summary languages
pub fn list_languages() {
    println!("{:<10} {:<6}", "Language", "Code");
    println!("{}", "-".repeat(17));
    for (_, name, code) in LANGUAGE_CODES.iter() {
        println!("{:<10} {:<6}", name, code);
    }
}

/// List the supported summary formats
pub fn list_formats() {
    for format in SummaryFormat::ALL {
        println!("{}", format.label());
    }
}

/// Handle config subcommands
pub fn config_command(settings: &Settings, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let toml = toml::to_string_pretty(&settings.redacted())?;
            println!("{}", toml);
        }
        ConfigCommand::Path => {
            let path = Settings::config_path()?;
            println!("{}", path.display());
        }
        ConfigCommand::Init { force } => {
            let path = Settings::config_path()?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Settings::write_default(&path)?;
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

/// Write the summary as a plain text file.
fn write_summary(path: &Path, summary: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let mut content = summary.to_string();
    if !content.ends_with('\n') {
        content.push('\n');
    }

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write summary to {}", path.display()))
}
