//! Per-column statistical signals.
//!
//! Every rule is a small named predicate or scorer over a single cell, so the
//! rules can be tested without the resolver:
//!
//! | Rule                 | Kind      | Meaning                                        |
//! |----------------------|-----------|------------------------------------------------|
//! | [`is_transcription`] | predicate | `[...]` / `/.../` or contains a phonetic symbol |
//! | [`is_cyrillic`]      | predicate | more than half of the letters are Cyrillic      |
//! | [`is_cjk`]           | predicate | contains a CJK character                       |
//! | [`is_numeric`]       | predicate | digits only (row numbers)                      |
//! | [`english_density`]  | scorer    | share of ASCII letters                         |
//! | [`target_density`]   | scorer    | target-language likelihood from diacritics     |
//!
//! [`score_columns`] aggregates them over a bounded sample of data rows.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::config::LanguageProfile;
use crate::models::DataRow;

/// An opening `[` or `/` later followed by a closing `]` or `/`.
static DELIMITED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\[/].*[\]/]").expect("valid transcription regex"));

/// ASCII digits only; `\d` would accept any Unicode digit.
static NUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").expect("valid numeric regex"));

/// IPA letters outside the U+0250..U+02AF block, plus stress and length marks.
const PHONETIC_SYMBOLS: &str = "əɪʌːθðŋæʃʒɑɔʊɛɜɒʍʰˈˌ";

/// Characters ignored by the density scorers.
const NEUTRAL_PUNCTUATION: &str = "-'.,!?;:()";

/// Score boost for a cell with at least one target diacritic.
const DIACRITIC_BASELINE: f64 = 0.8;

/// Weight of the Latin ratio for a cell without target diacritics.
const PLAIN_LATIN_WEIGHT: f64 = 0.3;

// =============================================================================
// Character classes
// =============================================================================

pub fn is_phonetic_symbol(c: char) -> bool {
    PHONETIC_SYMBOLS.contains(c) || ('\u{0250}'..='\u{02AF}').contains(&c)
}

pub fn is_cyrillic_char(c: char) -> bool {
    ('\u{0400}'..='\u{04FF}').contains(&c)
}

pub fn is_cjk_char(c: char) -> bool {
    ('\u{3000}'..='\u{9FFF}').contains(&c) || ('\u{F900}'..='\u{FAFF}').contains(&c)
}

/// Cell characters that carry script information.
fn significant_chars(val: &str) -> Vec<char> {
    val.chars()
        .filter(|c| !c.is_whitespace() && !NEUTRAL_PUNCTUATION.contains(*c))
        .collect()
}

// =============================================================================
// Cell predicates
// =============================================================================

/// Boolean per-cell flags counted into column fractions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellFlag {
    Transcription,
    Cyrillic,
    Cjk,
    Numeric,
}

/// The predicate table, indexed by `CellFlag as usize`.
pub const CELL_PREDICATES: [(CellFlag, fn(&str) -> bool); 4] = [
    (CellFlag::Transcription, is_transcription),
    (CellFlag::Cyrillic, is_cyrillic),
    (CellFlag::Cjk, is_cjk),
    (CellFlag::Numeric, is_numeric),
];

/// Looks like a phonetic transcription: `[ˈæpəl]`, `/ˈæpəl/`, `ˈæpəl`.
pub fn is_transcription(val: &str) -> bool {
    !val.is_empty() && (val.chars().any(is_phonetic_symbol) || DELIMITED.is_match(val))
}

/// More than half of the significant characters are Cyrillic.
pub fn is_cyrillic(val: &str) -> bool {
    let chars = significant_chars(val);
    let cyrillic = chars.iter().filter(|c| is_cyrillic_char(**c)).count();
    cyrillic as f64 / chars.len().max(1) as f64 > 0.5
}

pub fn is_cjk(val: &str) -> bool {
    val.chars().any(is_cjk_char)
}

pub fn is_numeric(val: &str) -> bool {
    NUMERIC.is_match(val.trim())
}

// =============================================================================
// Cell scorers
// =============================================================================

/// Share of significant characters that are ASCII letters (0..=1).
pub fn english_density(val: &str) -> f64 {
    let chars = significant_chars(val);
    if chars.is_empty() {
        return 0.0;
    }
    let latin = chars.iter().filter(|c| c.is_ascii_alphabetic()).count();
    latin as f64 / chars.len() as f64
}

/// Target-language likelihood.
///
/// - any Cyrillic letter: 0 (another language)
/// - at least one target diacritic: `0.8 + 0.2 * diacritics / len`
/// - otherwise `0.3 * latin / len`, so plain Latin stays ambiguous
pub fn target_density(val: &str, profile: &LanguageProfile) -> f64 {
    let chars = significant_chars(val);
    if chars.is_empty() {
        return 0.0;
    }
    if chars.iter().any(|c| is_cyrillic_char(*c)) {
        return 0.0;
    }

    let len = chars.len() as f64;
    let diacritics = chars.iter().filter(|c| profile.is_diacritic(**c)).count();
    if diacritics > 0 {
        return DIACRITIC_BASELINE + (diacritics as f64 / len) * (1.0 - DIACRITIC_BASELINE);
    }

    let latin = chars
        .iter()
        .filter(|c| c.is_ascii_alphabetic() || profile.is_diacritic(**c))
        .count();
    (latin as f64 / len) * PLAIN_LATIN_WEIGHT
}

// =============================================================================
// Column aggregation
// =============================================================================

/// Signals for one column over the sampled rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSignal {
    /// 0-based column index
    pub col: usize,
    /// No non-empty sampled value
    pub empty: bool,
    /// Non-empty sampled values
    pub sample_size: usize,
    pub trans_pct: f64,
    pub english_score: f64,
    pub target_score: f64,
    pub cyrillic_pct: f64,
    pub cjk_pct: f64,
    pub numeric_pct: f64,
    /// Average cell length in characters
    pub avg_len: f64,
}

impl ColumnSignal {
    fn empty(col: usize) -> Self {
        Self {
            col,
            empty: true,
            ..Default::default()
        }
    }

    fn from_values(col: usize, values: &[&str], profile: &LanguageProfile) -> Self {
        if values.is_empty() {
            return Self::empty(col);
        }

        let n = values.len() as f64;
        let mut counts = [0usize; CELL_PREDICATES.len()];
        let mut english = 0.0;
        let mut target = 0.0;
        let mut chars = 0usize;

        for &val in values {
            for (i, (_, predicate)) in CELL_PREDICATES.iter().enumerate() {
                if predicate(val) {
                    counts[i] += 1;
                }
            }
            english += english_density(val);
            target += target_density(val, profile);
            chars += val.chars().count();
        }

        let pct = |flag: CellFlag| counts[flag as usize] as f64 / n;

        Self {
            col,
            empty: false,
            sample_size: values.len(),
            trans_pct: pct(CellFlag::Transcription),
            english_score: english / n,
            target_score: target / n,
            cyrillic_pct: pct(CellFlag::Cyrillic),
            cjk_pct: pct(CellFlag::Cjk),
            numeric_pct: pct(CellFlag::Numeric),
            avg_len: chars as f64 / n,
        }
    }
}

/// Score columns `0..width` over the first `sample_rows` data rows.
///
/// `rows` must already exclude the header and blank rows.
pub fn score_columns(
    rows: &[DataRow<'_>],
    width: usize,
    sample_rows: usize,
    profile: &LanguageProfile,
) -> Vec<ColumnSignal> {
    let sample = &rows[..rows.len().min(sample_rows)];

    (0..width)
        .map(|col| {
            let values: Vec<&str> = sample
                .iter()
                .map(|row| row.cell(col))
                .filter(|v| !v.is_empty())
                .collect();
            ColumnSignal::from_values(col, &values, profile)
        })
        .collect()
}
