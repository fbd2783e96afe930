//! Row extraction and validation.
//!
//! Walks data rows with resolved columns, collecting accepted words, row
//! errors and duplicates. Nothing here aborts the run.

use std::collections::HashSet;

use crate::config::LanguageProfile;
use crate::error::DetectionError;
use crate::models::{DataRow, ExtractedWord, RoleAssignment};

/// Columns guaranteed to be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedColumns {
    pub english: usize,
    pub transcription: Option<usize>,
    pub translation: usize,
}

impl ResolvedColumns {
    /// Require English and translation columns; English is checked first.
    pub fn from_assignment(
        assignment: &RoleAssignment,
        profile: &LanguageProfile,
    ) -> Result<Self, DetectionError> {
        let english = assignment.english_col.ok_or(DetectionError::EnglishColumn)?;
        let translation =
            assignment
                .translation_col
                .ok_or_else(|| DetectionError::TranslationColumn {
                    language: profile.language_name.clone(),
                })?;

        Ok(Self {
            english,
            transcription: assignment.transcription_col,
            translation,
        })
    }
}

/// Output of [`extract_words`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub words: Vec<ExtractedWord>,
    pub errors: Vec<String>,
    pub duplicates: Vec<String>,
}

impl Extraction {
    pub fn summary(&self) -> String {
        format!(
            "Extracted: {} words, {} row errors, {} duplicates",
            self.words.len(),
            self.errors.len(),
            self.duplicates.len()
        )
    }
}

/// Extract words from `rows`. First occurrence of a word wins (case-insensitive).
pub fn extract_words(
    rows: &[DataRow<'_>],
    columns: ResolvedColumns,
    profile: &LanguageProfile,
) -> Extraction {
    let mut extraction = Extraction::default();
    let mut seen: HashSet<String> = HashSet::new();

    for row in rows {
        if row.is_blank() {
            continue;
        }

        let word = row.cell(columns.english);
        let transcription = columns.transcription.map(|c| row.cell(c)).unwrap_or("");
        let translation = row.cell(columns.translation);

        // Only noise columns filled in
        if word.is_empty() && transcription.is_empty() && translation.is_empty() {
            continue;
        }

        if word.is_empty() {
            extraction
                .errors
                .push(format!("Row {}: English word is empty", row.number));
            continue;
        }
        if translation.is_empty() {
            extraction.errors.push(format!(
                "Row {}: {} translation is empty for \"{}\"",
                row.number, profile.language_name, word
            ));
            continue;
        }

        if !seen.insert(word.to_lowercase()) {
            extraction.duplicates.push(word.to_string());
            continue;
        }

        extraction
            .words
            .push(ExtractedWord::new(word, transcription, translation));
    }

    extraction
}
