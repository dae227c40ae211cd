//! tubenotes - Turn YouTube transcripts into multilingual notes
//!
//! Fetches a video's caption track, flattens it to plain text and asks Gemini
//! to summarize it in the requested format and language.

pub mod cli;
pub mod config;
pub mod languages;
pub mod llm;
pub mod pipeline;
pub mod transcript;

use thiserror::Error;

/// Main error type for tubenotes
#[derive(Error, Debug)]
pub enum TubenotesError {
    #[error("Invalid YouTube link format: {0}")]
    MalformedUrl(String),

    #[error("Transcript unavailable: {0}")]
    TranscriptUnavailable(String),

    #[error("Summary generation failed: {0}")]
    GenerationFailed(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TubenotesError>;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "tubenotes";
