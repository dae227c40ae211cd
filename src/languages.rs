//! Closed choice sets offered to the user: summary formats and languages.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Output format requested from the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SummaryFormat {
    /// Bullet Points
    BulletPoints,
    /// Key Points
    KeyPoints,
    /// Short Paragraph
    ShortParagraph,
}

impl SummaryFormat {
    pub const ALL: [SummaryFormat; 3] = [
        SummaryFormat::BulletPoints,
        SummaryFormat::KeyPoints,
        SummaryFormat::ShortParagraph,
    ];

    /// Human-readable label substituted into the prompt
    pub fn label(&self) -> &'static str {
        match self {
            Self::BulletPoints => "Bullet Points",
            Self::KeyPoints => "Key Points",
            Self::ShortParagraph => "Short Paragraph",
        }
    }
}

impl Default for SummaryFormat {
    fn default() -> Self {
        Self::BulletPoints
    }
}

impl std::fmt::Display for SummaryFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Summary language, also used to pick the caption track
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Spanish,
    French,
    German,
    Hindi,
    Chinese,
    Japanese,
    Arabic,
}

/// Language name to caption language code, in declaration order.
pub const LANGUAGE_CODES: [(Language, &str, &str); 8] = [
    (Language::English, "English", "en"),
    (Language::Spanish, "Spanish", "es"),
    (Language::French, "French", "fr"),
    (Language::German, "German", "de"),
    (Language::Hindi, "Hindi", "hi"),
    (Language::Chinese, "Chinese", "zh"),
    (Language::Japanese, "Japanese", "ja"),
    (Language::Arabic, "Arabic", "ar"),
];

impl Language {
    fn entry(&self) -> &'static (Language, &'static str, &'static str) {
        &LANGUAGE_CODES[*self as usize]
    }

    /// Human-readable name passed to the model
    pub fn label(&self) -> &'static str {
        self.entry().1
    }

    /// Two-letter code used when looking up caption tracks
    pub fn code(&self) -> &'static str {
        self.entry().2
    }

    pub fn from_code(code: &str) -> Option<Self> {
        LANGUAGE_CODES
            .iter()
            .find(|(_, _, c)| c.eq_ignore_ascii_case(code))
            .map(|(lang, _, _)| *lang)
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::English
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
