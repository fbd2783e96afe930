//! Header row detection.

use crate::config::LanguageProfile;

/// Only the first cells of a row are inspected.
const MAX_HEADER_CELLS: usize = 10;

/// Matching cells needed to call a row a header.
const MIN_HEADER_MATCHES: usize = 2;

/// Whether `cell` starts with a header token ("Word (EN)", "Turkmen terjime").
pub fn is_header_cell(cell: &str, profile: &LanguageProfile) -> bool {
    let cell = cell.trim().to_lowercase();
    if cell.is_empty() {
        return false;
    }
    profile
        .header_vocabulary()
        .any(|token| cell.starts_with(token))
}

/// Whether the first row of a table is a header to be skipped.
pub fn is_header_row(row: &[String], profile: &LanguageProfile) -> bool {
    if row.len() < MIN_HEADER_MATCHES {
        return false;
    }

    let matches = row
        .iter()
        .take(MAX_HEADER_CELLS)
        .filter(|cell| is_header_cell(cell, profile))
        .count();

    matches >= MIN_HEADER_MATCHES
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_standard_header() {
        let profile = LanguageProfile::turkmen();
        assert!(is_header_row(
            &row(&["#", "Word", "Transcription", "Translation"]),
            &profile
        ));
    }

    #[test]
    fn test_localized_header() {
        let profile = LanguageProfile::turkmen();
        assert!(is_header_row(&row(&["Söz", "Türkmen terjimesi"]), &profile));
        assert!(is_header_row(&row(&["ENGLISH", "RUSSIAN", "kanji"]), &profile));
    }

    #[test]
    fn test_data_row_is_not_header() {
        let profile = LanguageProfile::turkmen();
        assert!(!is_header_row(&row(&["apple", "[ˈæpəl]", "alma"]), &profile));
        // One accidental prefix match is not enough.
        assert!(!is_header_row(&row(&["1", "cold", "[kəʊld]", "sowuk"]), &profile));
    }

    #[test]
    fn test_single_cell_row_is_not_header() {
        let profile = LanguageProfile::turkmen();
        assert!(!is_header_row(&row(&["word"]), &profile));
    }

    #[test]
    fn test_only_first_ten_cells_count() {
        let profile = LanguageProfile::turkmen();
        let mut cells = vec![""; 10];
        cells.push("word");
        cells.push("translation");
        assert!(!is_header_row(&row(&cells), &profile));
    }

    #[test]
    fn test_empty_cells_never_match() {
        let profile = LanguageProfile::turkmen();
        assert!(!is_header_cell("   ", &profile));
    }
}
