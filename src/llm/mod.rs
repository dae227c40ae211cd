//! LLM module for tubenotes
//!
//! Builds the summary prompt and sends it to the Gemini API.

mod client;
mod gemini;
mod prompts;

pub use client::{build_backend, GenerativeBackend, SummaryGenerator, SummaryRequest, SummaryText};
pub use gemini::GeminiClient;
pub use prompts::{assemble_prompt, build_summary_prompt};
