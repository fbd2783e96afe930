//! Domain models for the Lexload import pipeline.
//!
//! - [`RawTable`] - Decoded table of trimmed cell strings
//! - [`DataRow`] - A non-blank row after the header, with its original row number
//! - [`ColumnRole`] - Role assigned to a column
//! - [`RoleAssignment`] - Resolved English / transcription / translation columns
//! - [`ExtractedWord`] - One accepted vocabulary entry
//! - [`ParseResult`] - Output of a successful import

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Transcription shown when the file has no transcription column or cell.
pub const TRANSCRIPTION_PLACEHOLDER: &str = "—";

// =============================================================================
// Tables
// =============================================================================

/// An ordered sequence of rows of cell strings.
///
/// Rows are not guaranteed to be rectangular: missing cells read as "".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Build a table, trimming every cell.
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(|c| c.trim().to_string()).collect())
            .collect();
        Self { rows }
    }

    /// Convenience constructor for literals.
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = C>,
        C: Into<String>,
    {
        Self::new(
            rows.into_iter()
                .map(|r| r.into_iter().map(Into::into).collect())
                .collect(),
        )
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Maximum row length observed.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// A data row borrowed from a [`RawTable`].
#[derive(Debug, Clone, Copy)]
pub struct DataRow<'a> {
    /// 1-based position in the table before the header was stripped.
    pub number: usize,
    pub cells: &'a [String],
}

impl<'a> DataRow<'a> {
    /// Trimmed cell value, "" when the row is shorter than `col`.
    pub fn cell(&self, col: usize) -> &'a str {
        self.cells.get(col).map(|c| c.trim()).unwrap_or("")
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|c| c.trim().is_empty())
    }
}

// =============================================================================
// Column Roles
// =============================================================================

/// Semantic role of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnRole {
    English,
    Transcription,
    Translation,
    Ignored,
    Unused,
}

impl ColumnRole {
    /// Label used in the detection info string.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Transcription => "Transcription",
            Self::Translation => "Translation",
            Self::Ignored => "ignored",
            Self::Unused => "unused",
        }
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Column indices (0-based) resolved for each role.
///
/// An index appears in at most one of the fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleAssignment {
    pub english_col: Option<usize>,
    pub transcription_col: Option<usize>,
    pub translation_col: Option<usize>,
    pub ignored_cols: BTreeSet<usize>,
}

impl RoleAssignment {
    /// Role of column `col`. Precedence follows the detection info order.
    pub fn role_of(&self, col: usize) -> ColumnRole {
        if self.english_col == Some(col) {
            ColumnRole::English
        } else if self.transcription_col == Some(col) {
            ColumnRole::Transcription
        } else if self.translation_col == Some(col) {
            ColumnRole::Translation
        } else if self.ignored_cols.contains(&col) {
            ColumnRole::Ignored
        } else {
            ColumnRole::Unused
        }
    }

    /// `"Detected layout: Col 1: English | Col 2: ..."` over `width` columns.
    pub fn describe(&self, width: usize) -> String {
        let cols: Vec<String> = (0..width)
            .map(|c| format!("Col {}: {}", c + 1, self.role_of(c)))
            .collect();
        format!("Detected layout: {}", cols.join(" | "))
    }
}

// =============================================================================
// Results
// =============================================================================

/// One accepted vocabulary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedWord {
    pub word: String,
    pub transcription: String,
    pub translation: String,
}

impl ExtractedWord {
    /// Build an entry, substituting the placeholder for a blank transcription.
    pub fn new(
        word: impl Into<String>,
        transcription: impl Into<String>,
        translation: impl Into<String>,
    ) -> Self {
        let transcription = transcription.into();
        Self {
            word: word.into(),
            transcription: if transcription.trim().is_empty() {
                TRANSCRIPTION_PLACEHOLDER.to_string()
            } else {
                transcription
            },
            translation: translation.into(),
        }
    }
}

/// Result of a successful import.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    /// Accepted entries, in row order
    pub words: Vec<ExtractedWord>,
    /// Row-level validation messages
    pub errors: Vec<String>,
    /// English words skipped because they were already accepted
    pub duplicates: Vec<String>,
    /// Non-blank data rows considered (header excluded)
    pub total_rows: usize,
    /// Whether the first row was detected as a header
    pub skipped_header: bool,
    /// Human-readable column layout
    pub detection_info: String,
}

impl ParseResult {
    /// Whether the user should review warnings before committing the words.
    pub fn has_warnings(&self) -> bool {
        !self.errors.is_empty() || !self.duplicates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_trims_and_measures_width() {
        let table = RawTable::from_rows(vec![vec![" apple ", "alma"], vec!["pear", "armyt", " x "]]);
        assert_eq!(table.width(), 3);
        assert_eq!(table.rows()[0][0], "apple");
        assert_eq!(table.rows()[1][2], "x");
    }

    #[test]
    fn test_data_row_missing_cells_are_empty() {
        let cells = vec!["apple".to_string()];
        let row = DataRow { number: 2, cells: &cells };
        assert_eq!(row.cell(0), "apple");
        assert_eq!(row.cell(5), "");
        assert!(!row.is_blank());
    }

    #[test]
    fn test_role_precedence_and_description() {
        let assignment = RoleAssignment {
            english_col: Some(1),
            transcription_col: Some(2),
            translation_col: Some(3),
            ignored_cols: [0].into_iter().collect(),
        };
        assert_eq!(
            assignment.describe(5),
            "Detected layout: Col 1: ignored | Col 2: English | Col 3: Transcription | Col 4: Translation | Col 5: unused"
        );
    }

    #[test]
    fn test_placeholder_transcription() {
        let word = ExtractedWord::new("apple", "", "alma");
        assert_eq!(word.transcription, TRANSCRIPTION_PLACEHOLDER);
        let word = ExtractedWord::new("apple", "[ˈæpəl]", "alma");
        assert_eq!(word.transcription, "[ˈæpəl]");
    }

    #[test]
    fn test_parse_result_serializes_camel_case() {
        let result = ParseResult {
            total_rows: 3,
            skipped_header: true,
            ..Default::default()
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["totalRows"], 3);
        assert_eq!(json["skippedHeader"], true);
        assert!(json.get("detectionInfo").is_some());
    }
}
