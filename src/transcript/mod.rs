//! Transcript module for tubenotes
//!
//! Turns a video URL into flattened caption text.

mod fetcher;
mod video_id;
mod youtube;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use fetcher::{join_segments, select_track, TranscriptFetcher};
pub use video_id::{extract_video_id, VideoId};
pub use youtube::YoutubeCaptionService;

/// One language track advertised for a video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionTrack {
    /// Language code as reported by the site (e.g. "en", "en-GB")
    pub language_code: String,

    /// Display name of the language
    pub name: String,

    /// Whether the track was generated by speech recognition
    pub is_generated: bool,

    /// URL the timed text is downloaded from
    pub base_url: String,
}

/// A single timed caption line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionSegment {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

/// Flattened transcript text; never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptText {
    text: String,
    language_code: String,
}

impl TranscriptText {
    /// Returns `None` when `text` is empty or whitespace only.
    pub fn new(text: String, language_code: impl Into<String>) -> Option<Self> {
        if text.trim().is_empty() {
            return None;
        }
        Some(Self {
            text,
            language_code: language_code.into(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Language code of the track the text came from
    pub fn language_code(&self) -> &str {
        &self.language_code
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl std::fmt::Display for TranscriptText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Caption listing and retrieval service
#[async_trait]
pub trait CaptionService: Send + Sync {
    /// List the caption tracks available for a video.
    async fn list_tracks(&self, video_id: &VideoId) -> Result<Vec<CaptionTrack>>;

    /// Download the ordered segments of one track.
    async fn fetch_segments(&self, track: &CaptionTrack) -> Result<Vec<CaptionSegment>>;
}
