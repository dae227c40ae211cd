//! Transcript retrieval: identifier extraction, track selection and flattening

use crate::transcript::{
    extract_video_id, CaptionSegment, CaptionService, CaptionTrack, TranscriptText, VideoId,
};
use crate::{Result, TubenotesError};

/// Fetches flattened transcripts through a caption service
pub struct TranscriptFetcher {
    service: Box<dyn CaptionService>,
    default_language: String,
}

impl TranscriptFetcher {
    pub fn new(service: Box<dyn CaptionService>, default_language: impl Into<String>) -> Self {
        Self {
            service,
            default_language: default_language.into(),
        }
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Fetch the transcript of the video at `video_url` in `language_code`,
    /// falling back to the default language.
    pub async fn fetch(&self, video_url: &str, language_code: &str) -> Result<TranscriptText> {
        let video_id = extract_video_id(video_url)?;
        self.fetch_video(&video_id, language_code).await
    }

    /// Same as [`fetch`](Self::fetch) for an already extracted identifier.
    pub async fn fetch_video(
        &self,
        video_id: &VideoId,
        language_code: &str,
    ) -> Result<TranscriptText> {
        let tracks = self.service.list_tracks(video_id).await.map_err(|e| {
            TubenotesError::TranscriptUnavailable(format!(
                "could not list caption tracks for {video_id}: {e:#}"
            ))
        })?;

        if tracks.is_empty() {
            return Err(TubenotesError::TranscriptUnavailable(format!(
                "no caption tracks for {video_id}"
            )));
        }

        let track = select_track(&tracks, language_code, &self.default_language).ok_or_else(|| {
            TubenotesError::TranscriptUnavailable(format!(
                "no '{}' or '{}' captions for {video_id}",
                language_code, self.default_language
            ))
        })?;

        if !same_language(&track.language_code, language_code) {
            tracing::warn!(
                "No '{}' captions for {}, using '{}' instead",
                language_code,
                video_id,
                track.language_code
            );
        }
        tracing::info!(
            "Using {} caption track ({}{})",
            track.language_code,
            track.name,
            if track.is_generated { ", auto-generated" } else { "" }
        );

        let segments = self.service.fetch_segments(track).await.map_err(|e| {
            TubenotesError::TranscriptUnavailable(format!(
                "could not download '{}' captions for {video_id}: {e:#}",
                track.language_code
            ))
        })?;

        tracing::debug!("Fetched {} caption segments", segments.len());

        TranscriptText::new(join_segments(&segments), track.language_code.clone()).ok_or_else(
            || {
                TubenotesError::TranscriptUnavailable(format!(
                    "'{}' captions for {video_id} are empty",
                    track.language_code
                ))
            },
        )
    }
}

/// Pick the requested track when it exists, otherwise the default-language track.
///
/// An exact language code match beats a base-subtag match (`en-GB` for `en`),
/// and a manually created track beats an auto-generated one.
pub fn select_track<'a>(
    tracks: &'a [CaptionTrack],
    requested: &str,
    default: &str,
) -> Option<&'a CaptionTrack> {
    if !requested.eq_ignore_ascii_case(default) {
        if let Some(track) = find_track(tracks, requested) {
            return Some(track);
        }
    }
    find_track(tracks, default)
}

fn find_track<'a>(tracks: &'a [CaptionTrack], code: &str) -> Option<&'a CaptionTrack> {
    let exact: Vec<_> = tracks
        .iter()
        .filter(|t| t.language_code.eq_ignore_ascii_case(code))
        .collect();
    if let Some(track) = prefer_manual(&exact) {
        return Some(track);
    }

    let related: Vec<_> = tracks
        .iter()
        .filter(|t| same_language(&t.language_code, code))
        .collect();
    prefer_manual(&related)
}

fn prefer_manual<'a>(candidates: &[&'a CaptionTrack]) -> Option<&'a CaptionTrack> {
    candidates
        .iter()
        .find(|t| !t.is_generated)
        .or_else(|| candidates.first())
        .copied()
}

fn same_language(a: &str, b: &str) -> bool {
    base_subtag(a).eq_ignore_ascii_case(base_subtag(b))
}

fn base_subtag(code: &str) -> &str {
    code.split(['-', '_']).next().unwrap_or(code)
}

/// Join segment text in order, separated by single spaces.
pub fn join_segments(segments: &[CaptionSegment]) -> String {
    segments
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
