//! Application settings management

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variables checked for the Gemini API key, in priority order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["TUBENOTES_GEMINI_API_KEY", "GOOGLE_API_KEY"];

/// Main application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// General settings
    #[serde(default)]
    pub general: GeneralSettings,

    /// Caption retrieval settings
    #[serde(default)]
    pub transcript: TranscriptSettings,

    /// LLM settings
    #[serde(default)]
    pub llm: LlmSettings,

    /// Summary export settings
    #[serde(default)]
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSettings {
    /// Caption language used when the requested one is missing
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Base URL of the video site
    #[serde(default = "default_youtube_endpoint")]
    pub endpoint: String,

    /// HTTP timeout in seconds
    #[serde(default = "default_transcript_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// LLM provider (gemini)
    #[serde(default = "default_llm_provider")]
    pub provider: String,

    /// API key (for cloud providers)
    #[serde(default)]
    pub api_key: String,

    /// Model name
    #[serde(default = "default_llm_model")]
    pub model: String,

    /// API endpoint (empty = provider default)
    #[serde(default)]
    pub endpoint: String,

    /// HTTP timeout in seconds
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    /// File name used when exporting a summary without an explicit path
    #[serde(default = "default_output_file")]
    pub file_name: String,
}

// Default value functions

fn default_log_level() -> String {
    "info".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_youtube_endpoint() -> String {
    "https://www.youtube.com".to_string()
}

fn default_transcript_timeout() -> u64 {
    30
}

fn default_llm_provider() -> String {
    "gemini".to_string()
}

fn default_llm_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_llm_timeout() -> u64 {
    45
}

fn default_output_file() -> String {
    "summary.txt".to_string()
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for TranscriptSettings {
    fn default() -> Self {
        Self {
            default_language: default_language(),
            endpoint: default_youtube_endpoint(),
            timeout_secs: default_transcript_timeout(),
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: default_llm_provider(),
            api_key: String::new(),
            model: default_llm_model(),
            endpoint: String::new(),
            timeout_secs: default_llm_timeout(),
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            file_name: default_output_file(),
        }
    }
}

impl Settings {
    /// Load settings from the configuration file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            tracing::debug!("No config file found, using defaults");
            let mut settings = Self::default();
            settings.apply_env_overrides();
            return Ok(settings);
        }

        let mut settings = Self::load_path(&config_path)?;
        settings.apply_env_overrides();

        Ok(settings)
    }

    /// Parse settings from a specific file without applying env overrides
    pub fn load_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        let lookup = |name: &str| std::env::var(name).ok();
        self.apply_api_key_override(lookup);
    }

    fn apply_api_key_override<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if !self.llm.api_key.trim().is_empty() {
            return;
        }

        if let Some(key) = API_KEY_ENV_VARS
            .iter()
            .filter_map(|name| lookup(name))
            .find(|key| !key.trim().is_empty())
        {
            self.llm.api_key = key.trim().to_string();
        }
    }

    /// The Gemini API key, or a configuration error when none is set.
    pub fn require_api_key(&self) -> crate::Result<&str> {
        let key = self.llm.api_key.trim();
        if key.is_empty() {
            return Err(crate::TubenotesError::Config(format!(
                "Gemini API key is missing. Set llm.api_key in config or {}.",
                API_KEY_ENV_VARS.join(" / ")
            )));
        }
        Ok(key)
    }

    /// Get the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "tubenotes", "tubenotes")
            .context("Could not determine config directory")?;

        let config_dir = dirs.config_dir();
        Ok(config_dir.join("config.toml"))
    }

    /// Write default configuration to a file
    pub fn write_default(path: &Path) -> Result<()> {
        let settings = Self::default();
        let content = toml::to_string_pretty(&settings)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Settings rendered for display, with the API key masked.
    pub fn redacted(&self) -> Self {
        let mut shown = self.clone();
        if !shown.llm.api_key.is_empty() {
            shown.llm.api_key = "********".to_string();
        }
        shown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_to_gemini_25_flash() {
        let settings = Settings::default();
        assert_eq!(settings.llm.model, "gemini-2.5-flash");
        assert_eq!(settings.transcript.default_language, "en");
        assert_eq!(settings.output.file_name, "summary.txt");
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let settings: Settings = toml::from_str("[llm]\nmodel = \"gemini-pro\"\n").unwrap();
        assert_eq!(settings.llm.model, "gemini-pro");
        assert_eq!(settings.llm.provider, "gemini");
        assert_eq!(settings.transcript.timeout_secs, 30);
    }

    #[test]
    fn env_key_fills_empty_config_key() {
        let env: HashMap<&str, &str> = [("GOOGLE_API_KEY", " from-google ")].into();
        let mut settings = Settings::default();
        settings.apply_api_key_override(|name| env.get(name).map(|v| v.to_string()));
        assert_eq!(settings.llm.api_key, "from-google");
    }

    #[test]
    fn tool_specific_env_var_wins() {
        let env: HashMap<&str, &str> = [
            ("GOOGLE_API_KEY", "google"),
            ("TUBENOTES_GEMINI_API_KEY", "tubenotes"),
        ]
        .into();
        let mut settings = Settings::default();
        settings.apply_api_key_override(|name| env.get(name).map(|v| v.to_string()));
        assert_eq!(settings.llm.api_key, "tubenotes");
    }

    #[test]
    fn config_key_is_not_overridden() {
        let mut settings = Settings::default();
        settings.llm.api_key = "from-file".to_string();
        settings.apply_api_key_override(|_| Some("from-env".to_string()));
        assert_eq!(settings.llm.api_key, "from-file");
    }

    #[test]
    fn missing_key_is_a_config_error() {
        let settings = Settings::default();
        let err = settings.require_api_key().unwrap_err();
        assert!(matches!(err, crate::TubenotesError::Config(_)));
        assert!(err.to_string().contains("Gemini API key is missing"));
    }

    #[test]
    fn redacted_masks_api_key() {
        let mut settings = Settings::default();
        settings.llm.api_key = "secret".to_string();
        assert_eq!(settings.redacted().llm.api_key, "********");
    }
}
