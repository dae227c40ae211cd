//! Video identifier extraction

use crate::{Result, TubenotesError};

/// Query key that carries the identifier in a watch URL.
const ID_KEY: &str = "v";

/// Identifier of a single video, as found in its watch URL
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch page for this video
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }

    /// Preview image for this video
    pub fn thumbnail_url(&self) -> String {
        format!("https://img.youtube.com/vi/{}/0.jpg", self.0)
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extract the video identifier from the `v=` query parameter.
///
/// Only a whole `v` key in the query string counts; `dev=` or a `v=` in the
/// path does not. The identifier runs until the next `&` or the fragment.
pub fn extract_video_id(url: &str) -> Result<VideoId> {
    let url = url.trim();
    let query = url
        .split_once('?')
        .map(|(_, rest)| rest.split('#').next().unwrap_or(rest))
        .ok_or_else(|| TubenotesError::MalformedUrl(format!("no query string in {url}")))?;

    let id = query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == ID_KEY)
        .map(|(_, value)| value)
        .ok_or_else(|| TubenotesError::MalformedUrl(format!("no '{ID_KEY}=' parameter in {url}")))?;

    if id.is_empty() {
        return Err(TubenotesError::MalformedUrl(format!(
            "empty video identifier in {url}"
        )));
    }

    Ok(VideoId(id.to_string()))
}
