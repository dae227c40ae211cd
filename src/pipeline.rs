//! Notes pipeline orchestration
//!
//! One request walks `Idle -> FetchingTranscript -> GeneratingSummary -> Done`,
//! stopping in `Failed` at the first error.

use crate::languages::{Language, SummaryFormat};
use crate::llm::{SummaryGenerator, SummaryRequest, SummaryText};
use crate::transcript::{extract_video_id, TranscriptFetcher, VideoId};
use crate::Result;

/// Stage of a single notes request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Idle,
    FetchingTranscript,
    GeneratingSummary,
    Done,
    Failed,
}

impl RequestState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::FetchingTranscript => "fetching-transcript",
            Self::GeneratingSummary => "generating-summary",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

/// What the user asked for
#[derive(Debug, Clone)]
pub struct NotesRequest {
    pub video_url: String,
    pub format: SummaryFormat,
    pub language: Language,
}

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub video_id: VideoId,
    /// Language code of the caption track actually used
    pub transcript_language: String,
    pub summary: SummaryText,
}

/// Runs transcript retrieval and summarization for one request
pub struct NotesPipeline {
    fetcher: TranscriptFetcher,
    generator: SummaryGenerator,
    state: RequestState,
}

impl NotesPipeline {
    pub fn new(fetcher: TranscriptFetcher, generator: SummaryGenerator) -> Self {
        Self {
            fetcher,
            generator,
            state: RequestState::Idle,
        }
    }

    /// State reached by the most recent run
    pub fn state(&self) -> RequestState {
        self.state
    }

    pub async fn run(&mut self, request: &NotesRequest) -> Result<PipelineOutcome> {
        self.state = RequestState::Idle;

        let result = self.run_stages(request).await;
        match &result {
            Ok(_) => self.transition(RequestState::Done),
            Err(e) => {
                tracing::error!("Request failed while {}: {}", self.state.as_str(), e);
                self.transition(RequestState::Failed);
            }
        }
        result
    }

    async fn run_stages(&mut self, request: &NotesRequest) -> Result<PipelineOutcome> {
        self.transition(RequestState::FetchingTranscript);
        let video_id = extract_video_id(&request.video_url)?;
        let transcript = self
            .fetcher
            .fetch_video(&video_id, request.language.code())
            .await?;

        tracing::info!(
            "Transcript for {} ready ({} chars)",
            video_id,
            transcript.as_str().len()
        );

        self.transition(RequestState::GeneratingSummary);
        let summary = self
            .generator
            .summarize(SummaryRequest {
                transcript: &transcript,
                format: request.format.label(),
                language: request.language.label(),
            })
            .await?;

        Ok(PipelineOutcome {
            video_id,
            transcript_language: transcript.language_code().to_string(),
            summary,
        })
    }

    fn transition(&mut self, next: RequestState) {
        tracing::debug!("{} -> {}", self.state.as_str(), next.as_str());
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::GenerativeBackend;
    use crate::transcript::{CaptionSegment, CaptionService, CaptionTrack};
    use crate::TubenotesError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    struct EnglishOnly;

    #[async_trait]
    impl CaptionService for EnglishOnly {
        async fn list_tracks(&self, _: &VideoId) -> anyhow::Result<Vec<CaptionTrack>> {
            Ok(vec![CaptionTrack {
                language_code: "en".to_string(),
                name: "English".to_string(),
                is_generated: false,
                base_url: "https://captions.test/en".to_string(),
            }])
        }

        async fn fetch_segments(&self, _: &CaptionTrack) -> anyhow::Result<Vec<CaptionSegment>> {
            Ok(["welcome", "to", "the", "show"]
                .iter()
                .enumerate()
                .map(|(i, text)| CaptionSegment {
                    text: text.to_string(),
                    start: i as f64,
                    duration: 1.0,
                })
                .collect())
        }
    }

    struct NoCaptions;

    #[async_trait]
    impl CaptionService for NoCaptions {
        async fn list_tracks(&self, _: &VideoId) -> anyhow::Result<Vec<CaptionTrack>> {
            Ok(Vec::new())
        }

        async fn fetch_segments(&self, _: &CaptionTrack) -> anyhow::Result<Vec<CaptionSegment>> {
            Ok(Vec::new())
        }
    }

    #[derive(Clone, Default)]
    struct FakeBackend {
        calls: Arc<AtomicUsize>,
        last_prompt: Arc<Mutex<String>>,
        reject_key: bool,
    }

    #[async_trait]
    impl GenerativeBackend for FakeBackend {
        async fn generate(&self, prompt: &str) -> anyhow::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = prompt.to_string();
            if self.reject_key {
                anyhow::bail!("Gemini returned 400 Bad Request: API key not valid.");
            }
            Ok("- a short show".to_string())
        }
    }

    fn pipeline(captions: Box<dyn CaptionService>, backend: FakeBackend) -> NotesPipeline {
        NotesPipeline::new(
            TranscriptFetcher::new(captions, "en"),
            SummaryGenerator::new(Box::new(backend)),
        )
    }

    fn request(url: &str) -> NotesRequest {
        NotesRequest {
            video_url: url.to_string(),
            format: SummaryFormat::BulletPoints,
            language: Language::Spanish,
        }
    }

    #[tokio::test]
    async fn successful_run_reaches_done() {
        let backend = FakeBackend::default();
        let mut pipeline = pipeline(Box::new(EnglishOnly), backend.clone());

        let outcome = pipeline
            .run(&request("https://x/watch?v=ABC123"))
            .await
            .unwrap();

        assert_eq!(pipeline.state(), RequestState::Done);
        assert_eq!(outcome.video_id.as_str(), "ABC123");
        assert_eq!(outcome.transcript_language, "en");
        assert_eq!(outcome.summary.as_str(), "- a short show");

        let prompt = backend.last_prompt.lock().unwrap();
        assert!(prompt.contains("Bullet Points"));
        assert!(prompt.contains("Language: Spanish"));
        assert!(prompt.ends_with("welcome to the show"));
    }

    #[tokio::test]
    async fn transcript_failure_never_reaches_generator() {
        let backend = FakeBackend::default();
        let mut pipeline = pipeline(Box::new(NoCaptions), backend.clone());

        let err = pipeline
            .run(&request("https://x/watch?v=ABC123"))
            .await
            .unwrap_err();

        assert!(matches!(err, TubenotesError::TranscriptUnavailable(_)));
        assert_eq!(pipeline.state(), RequestState::Failed);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn malformed_url_fails_before_generation() {
        let backend = FakeBackend::default();
        let mut pipeline = pipeline(Box::new(EnglishOnly), backend.clone());

        let err = pipeline
            .run(&request("https://x/watch?list=PL1"))
            .await
            .unwrap_err();

        assert!(matches!(err, TubenotesError::MalformedUrl(_)));
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn authentication_error_is_generation_failed() {
        let backend = FakeBackend {
            reject_key: true,
            ..FakeBackend::default()
        };
        let mut pipeline = pipeline(Box::new(EnglishOnly), backend.clone());

        let err = pipeline
            .run(&request("https://x/watch?v=ABC123"))
            .await
            .unwrap_err();

        assert!(matches!(err, TubenotesError::GenerationFailed(_)));
        assert_eq!(pipeline.state(), RequestState::Failed);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn each_run_starts_fresh() {
        let mut pipeline = pipeline(Box::new(EnglishOnly), FakeBackend::default());

        assert!(pipeline.run(&request("no marker")).await.is_err());
        assert_eq!(pipeline.state(), RequestState::Failed);

        assert!(pipeline.run(&request("https://x/watch?v=ok")).await.is_ok());
        assert_eq!(pipeline.state(), RequestState::Done);
    }
}
