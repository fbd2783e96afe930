//! Column role auto-detection.
//!
//! - `header`: is the first row a header?
//! - `signals`: per-column statistics over a bounded sample
//! - `resolver`: signals to [`RoleAssignment`]
//!
//! ```text
//! data rows ──▶ score_columns ──▶ Vec<ColumnSignal> ──▶ resolve_roles ──▶ RoleAssignment
//! ```

pub mod header;
pub mod resolver;
pub mod signals;

pub use header::{is_header_cell, is_header_row};
pub use resolver::{ignore_reason, resolve_roles};
pub use signals::{
    english_density, is_cjk, is_cyrillic, is_numeric, is_transcription, score_columns,
    target_density, CellFlag, ColumnSignal, CELL_PREDICATES,
};

use serde::Serialize;

use crate::config::LanguageProfile;
use crate::error::TableError;
use crate::models::{DataRow, RoleAssignment};

/// Outcome of column detection.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    /// Signals for every column, in column order
    pub signals: Vec<ColumnSignal>,
    /// Resolved roles (English / translation may be unresolved)
    pub assignment: RoleAssignment,
    /// `"Detected layout: Col 1: ... | ..."`
    pub detection_info: String,
}

/// Score and resolve columns `0..width` of the given data rows.
///
/// Fails only for tables narrower than two columns; unresolved roles are
/// reported through `assignment`.
pub fn detect_columns(
    rows: &[DataRow<'_>],
    width: usize,
    sample_rows: usize,
    profile: &LanguageProfile,
) -> Result<Detection, TableError> {
    if width < 2 {
        return Err(TableError::TooFewColumns { found: width });
    }

    let signals = score_columns(rows, width, sample_rows, profile);
    let assignment = resolve_roles(&signals);
    let detection_info = assignment.describe(width);

    Ok(Detection {
        signals,
        assignment,
        detection_info,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(raw: &[Vec<String>]) -> Vec<DataRow<'_>> {
        raw.iter()
            .enumerate()
            .map(|(i, cells)| DataRow { number: i + 1, cells })
            .collect()
    }

    fn table(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_single_column_is_structural_error() {
        let raw = table(&[&["apple"], &["pear"]]);
        let err = detect_columns(&rows(&raw), 1, 30, &LanguageProfile::turkmen()).unwrap_err();
        assert_eq!(err, TableError::TooFewColumns { found: 1 });
    }

    #[test]
    fn test_detects_mixed_layout() {
        let raw = table(&[
            &["1", "apple", "[ˈæpəl]", "alma", "яблоко", "りんご"],
            &["2", "beautiful", "[ˈbjuːtɪfəl]", "owadan", "красивый", "美しい"],
            &["3", "such", "[sʌtʃ]", "şeýle", "такой", "そのような"],
            &["4", "bubbly", "[ˈbʌbli]", "köpükli", "пузырчатый", "泡立つ"],
        ]);
        let detection = detect_columns(&rows(&raw), 6, 30, &LanguageProfile::turkmen()).unwrap();

        assert_eq!(
            detection.detection_info,
            "Detected layout: Col 1: ignored | Col 2: English | Col 3: Transcription | Col 4: Translation | Col 5: ignored | Col 6: ignored"
        );
        assert_eq!(detection.signals.len(), 6);
    }

    #[test]
    fn test_detection_info_lists_every_column_once() {
        let raw = table(&[&["apple", "alma", "", "x"], &["pear", "armyt", "", ""]]);
        let detection = detect_columns(&rows(&raw), 4, 30, &LanguageProfile::turkmen()).unwrap();
        let segments: Vec<&str> = detection
            .detection_info
            .trim_start_matches("Detected layout: ")
            .split(" | ")
            .collect();

        assert_eq!(segments.len(), 4);
        for (i, segment) in segments.iter().enumerate() {
            let (prefix, label) = segment.split_once(": ").unwrap();
            assert_eq!(prefix, format!("Col {}", i + 1));
            assert!(["English", "Transcription", "Translation", "ignored", "unused"]
                .contains(&label));
        }
    }
}
