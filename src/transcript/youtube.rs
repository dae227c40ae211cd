//! YouTube caption service
//!
//! Reads the caption track list from the player response embedded in the
//! watch page and downloads timed-text XML for the chosen track.

use anyhow::{Context, Result};
use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use crate::config::TranscriptSettings;
use crate::transcript::{CaptionSegment, CaptionService, CaptionTrack, VideoId};

const PLAYER_RESPONSE_ASSIGNMENT: &str = r"ytInitialPlayerResponse\s*=\s*\{";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

pub struct YoutubeCaptionService {
    http: Client,
    endpoint: String,
}

impl YoutubeCaptionService {
    pub fn from_settings(settings: &TranscriptSettings) -> Result<Self> {
        let endpoint = settings.endpoint.trim().trim_end_matches('/').to_string();
        if endpoint.is_empty() {
            anyhow::bail!("transcript.endpoint must not be empty");
        }

        Ok(Self {
            http: Client::builder()
                .user_agent(USER_AGENT)
                .timeout(Duration::from_secs(settings.timeout_secs.max(1)))
                .build()
                .context("Failed to build caption HTTP client")?,
            endpoint,
        })
    }

    fn watch_url(&self, video_id: &VideoId) -> String {
        format!("{}/watch?v={}", self.endpoint, video_id)
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        let response = self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await
            .with_context(|| format!("Request to {} failed", strip_query(url)))?
            .error_for_status()
            .context("Caption service returned an error status")?;

        response
            .text()
            .await
            .context("Failed to read caption service response")
    }
}

#[async_trait]
impl CaptionService for YoutubeCaptionService {
    async fn list_tracks(&self, video_id: &VideoId) -> Result<Vec<CaptionTrack>> {
        let url = self.watch_url(video_id);
        tracing::debug!("Fetching watch page: {}", url);

        let html = self.get_text(&url).await?;
        let player = extract_player_response(&html)?;
        let tracks = parse_caption_tracks(&player);

        tracing::debug!("Found {} caption tracks for {}", tracks.len(), video_id);
        Ok(tracks)
    }

    async fn fetch_segments(&self, track: &CaptionTrack) -> Result<Vec<CaptionSegment>> {
        tracing::debug!("Downloading {} caption track", track.language_code);

        let xml = self.get_text(&track.base_url).await?;
        parse_timed_text(&xml)
    }
}

/// Locate and parse the player response JSON embedded in a watch page.
pub(crate) fn extract_player_response(html: &str) -> Result<Value> {
    let assignment = Regex::new(PLAYER_RESPONSE_ASSIGNMENT)?
        .find(html)
        .context("Cannot find player data in watch page")?;

    // The match ends on the opening brace of the object.
    let json_start = assignment.end() - 1;

    // The page continues after the object, so trailing input is not checked.
    let mut de = serde_json::Deserializer::from_str(&html[json_start..]);
    Value::deserialize(&mut de).context("Failed to parse player data")
}

/// Read caption tracks out of a player response. Missing captions yield an empty list.
pub(crate) fn parse_caption_tracks(player: &Value) -> Vec<CaptionTrack> {
    let Some(tracks) = player
        .pointer("/captions/playerCaptionsTracklistRenderer/captionTracks")
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    tracks
        .iter()
        .filter_map(|track| {
            let base_url = track.get("baseUrl")?.as_str()?.to_string();
            let language_code = track.get("languageCode")?.as_str()?.to_string();
            let name = track
                .pointer("/name/simpleText")
                .or_else(|| track.pointer("/name/runs/0/text"))
                .and_then(Value::as_str)
                .unwrap_or(language_code.as_str())
                .to_string();
            let is_generated = track.get("kind").and_then(Value::as_str) == Some("asr");

            Some(CaptionTrack {
                language_code,
                name,
                is_generated,
                base_url,
            })
        })
        .collect()
}

/// Parse timed-text XML into ordered caption segments.
pub(crate) fn parse_timed_text(xml: &str) -> Result<Vec<CaptionSegment>> {
    let line_re = Regex::new(r#"(?s)<text\b([^>]*)>(.*?)</text>"#)?;
    let attr_re = Regex::new(r#"(\w+)="([^"]*)""#)?;
    let tag_re = Regex::new(r"<[^>]*>")?;

    let mut segments = Vec::new();
    for cap in line_re.captures_iter(xml) {
        let mut start = 0.0;
        let mut duration = 0.0;
        for attr in attr_re.captures_iter(&cap[1]) {
            match &attr[1] {
                "start" => start = attr[2].parse().unwrap_or(0.0),
                "dur" => duration = attr[2].parse().unwrap_or(0.0),
                _ => {}
            }
        }

        // Timed text is entity-encoded twice. Markup such as <font> is only
        // visible after the first decode; spoken `<` stays encoded until the second.
        let xml_decoded = html_escape::decode_html_entities(&cap[2]);
        let stripped = tag_re.replace_all(&xml_decoded, "");
        let html_decoded = html_escape::decode_html_entities(&stripped);
        let text = html_decoded.split_whitespace().collect::<Vec<_>>().join(" ");

        if text.is_empty() {
            continue;
        }

        segments.push(CaptionSegment {
            text,
            start,
            duration,
        });
    }

    Ok(segments)
}

fn strip_query(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}
