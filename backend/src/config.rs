//! Import configuration.
//!
//! - [`LanguageProfile`] - Target-language parameters used by detection
//! - [`ImportOptions`] - Word-count bounds, sample size, and the profile
//!
//! Defaults match the Turkmen word-list app. Bounds can be overridden from
//! the environment (a `.env` file is loaded by the binary):
//!
//! | Variable              | Default |
//! |-----------------------|---------|
//! | `LEXLOAD_MIN_WORDS`   | 10      |
//! | `LEXLOAD_MAX_WORDS`   | 200     |
//! | `LEXLOAD_SAMPLE_ROWS` | 30      |

use serde::{Deserialize, Serialize};
use std::env;

/// Minimum accepted words per import.
pub const DEFAULT_MIN_WORDS: usize = 10;

/// Maximum accepted words per import.
pub const DEFAULT_MAX_WORDS: usize = 200;

/// Number of non-empty data rows sampled per column.
pub const DEFAULT_SAMPLE_ROWS: usize = 30;

/// Tokens that mark a header cell regardless of the target language.
const COMMON_HEADER_TOKENS: &[&str] = &[
    "#",
    "no",
    "number",
    "word",
    "english",
    "transcription",
    "pronunciation",
    "phonetic",
    "translation",
    "meaning",
    "definition",
    "column",
    "col",
    "rus",
    "russian",
    "japan",
    "japanese",
    "idx",
    "index",
];

/// Target-language parameters.
///
/// Detection never hard-codes the translation language: the diacritic set
/// drives the target-density signal, the name shows up in messages, and the
/// header tokens extend the header vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageProfile {
    /// Display name ("Turkmen").
    pub language_name: String,
    /// Letters specific to the target alphabet, both cases.
    pub diacritics: String,
    /// Lowercase header tokens specific to the target language.
    pub header_tokens: Vec<String>,
}

impl LanguageProfile {
    /// Turkmen Latin alphabet: ä ç ş ň ö ü ý ž.
    pub fn turkmen() -> Self {
        Self {
            language_name: "Turkmen".to_string(),
            diacritics: "äçşňöüýžÄÇŞŇÖÜÝŽ".to_string(),
            header_tokens: ["turkmen", "türkmen", "terjime", "söz", "soz"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Whether `c` is one of the target-specific letters.
    pub fn is_diacritic(&self, c: char) -> bool {
        self.diacritics.contains(c)
    }

    /// Full header vocabulary: common tokens followed by the language tokens.
    pub fn header_vocabulary(&self) -> impl Iterator<Item = &str> {
        COMMON_HEADER_TOKENS
            .iter()
            .copied()
            .chain(self.header_tokens.iter().map(String::as_str))
    }
}

impl Default for LanguageProfile {
    fn default() -> Self {
        Self::turkmen()
    }
}

/// Options for the import pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOptions {
    /// Fewer accepted words fails the import
    pub min_words: usize,

    /// More accepted words fails the import
    pub max_words: usize,

    /// Non-empty data rows sampled for column signals
    pub sample_rows: usize,

    /// Target-language parameters
    pub profile: LanguageProfile,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            min_words: DEFAULT_MIN_WORDS,
            max_words: DEFAULT_MAX_WORDS,
            sample_rows: DEFAULT_SAMPLE_ROWS,
            profile: LanguageProfile::default(),
        }
    }
}

impl ImportOptions {
    /// Defaults overridden by `LEXLOAD_*` environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            min_words: env_usize("LEXLOAD_MIN_WORDS").unwrap_or(defaults.min_words),
            max_words: env_usize("LEXLOAD_MAX_WORDS").unwrap_or(defaults.max_words),
            sample_rows: env_usize("LEXLOAD_SAMPLE_ROWS")
                .filter(|n| *n > 0)
                .unwrap_or(defaults.sample_rows),
            profile: defaults.profile,
        }
    }
}

fn env_usize(key: &str) -> Option<usize> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
