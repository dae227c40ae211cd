use async_trait::async_trait;

use crate::config::Settings;
use crate::llm::gemini::GeminiClient;
use crate::llm::prompts::assemble_prompt;
use crate::transcript::TranscriptText;
use crate::{Result, TubenotesError};

/// Summary generation request payload.
pub struct SummaryRequest<'a> {
    pub transcript: &'a TranscriptText,
    /// Human-readable format label, e.g. "Bullet Points"
    pub format: &'a str,
    /// Human-readable language name, e.g. "French"
    pub language: &'a str,
}

/// Generated summary text, passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryText(String);

impl SummaryText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for SummaryText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A text generation backend taking one prompt and returning one response.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    async fn generate(&self, prompt: &str) -> anyhow::Result<String>;
}

/// Build a generation backend from runtime settings.
pub fn build_backend(settings: &Settings) -> Result<Box<dyn GenerativeBackend>> {
    match settings.llm.provider.to_lowercase().as_str() {
        "gemini" => {
            settings.require_api_key()?;
            let client = GeminiClient::from_settings(&settings.llm)
                .map_err(|e| TubenotesError::Config(format!("{e:#}")))?;
            Ok(Box::new(client))
        }
        other => Err(TubenotesError::Config(format!(
            "Unsupported llm.provider '{}'. Supported providers: gemini",
            other
        ))),
    }
}

/// Turns transcripts into summaries through a generative backend
pub struct SummaryGenerator {
    backend: Box<dyn GenerativeBackend>,
}

impl SummaryGenerator {
    pub fn new(backend: Box<dyn GenerativeBackend>) -> Self {
        Self { backend }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self::new(build_backend(settings)?))
    }

    /// Summarize a transcript in the requested format and language.
    pub async fn summarize(&self, request: SummaryRequest<'_>) -> Result<SummaryText> {
        let prompt = assemble_prompt(request.format, request.language, request.transcript.as_str());

        let text = self
            .backend
            .generate(&prompt)
            .await
            .map_err(|e| TubenotesError::GenerationFailed(format!("{e:#}")))?;

        if text.trim().is_empty() {
            return Err(TubenotesError::GenerationFailed(
                "model returned an empty response".to_string(),
            ));
        }

        Ok(SummaryText(text))
    }
}
