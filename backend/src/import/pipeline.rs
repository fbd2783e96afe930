//! High-level import API.
//!
//! Combines every step: header detection, column scoring, role resolution,
//! row extraction and word-count bounds.
//!
//! # Example
//!
//! ```rust,ignore
//! use lexload::{import_file, ImportOptions};
//!
//! let outcome = import_file("words.csv", &ImportOptions::default())?;
//! println!("{}", outcome.result.detection_info);
//! println!("Imported {} words", outcome.result.words.len());
//! ```

use serde::Serialize;
use std::path::Path;

use super::extractor::{extract_words, ResolvedColumns};
use crate::api::logs::{log_info, log_info_indent, log_success, log_warning};
use crate::config::ImportOptions;
use crate::detection::{detect_columns, ignore_reason, is_header_row, Detection};
use crate::error::{ImportError, ImportResult, TableError};
use crate::models::{DataRow, ParseResult, RawTable};
use crate::parser::{parse_bytes_auto, parse_file_auto, DecodedTable};

/// Result of a file-based import
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
    /// Pipeline result
    pub result: ParseResult,
    /// Intake metadata
    pub file_info: FileInfo,
}

/// Decoded file information
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    pub encoding: String,
    pub delimiter: char,
    /// Rows in the file, header and blank rows included
    pub row_count: usize,
}

/// Column detection over a file, without extraction or count bounds.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Inspection {
    pub file_info: FileInfo,
    pub skipped_header: bool,
    pub data_rows: usize,
    pub detection: Detection,
}

/// Non-blank rows after the optional header, numbered from the original table.
pub fn data_rows(table: &RawTable, skip_header: bool) -> Vec<DataRow<'_>> {
    let start = usize::from(skip_header);
    table
        .rows()
        .iter()
        .enumerate()
        .skip(start)
        .map(|(i, cells)| DataRow {
            number: i + 1,
            cells: cells.as_slice(),
        })
        .filter(|row| !row.is_blank())
        .collect()
}

/// Run the full pipeline over an already-decoded table.
///
/// Fails with no partial result on structural, detection or count-bound
/// errors. Row-level problems are reported inside the result.
pub fn import_table(table: &RawTable, options: &ImportOptions) -> ImportResult<ParseResult> {
    let profile = &options.profile;

    let width = table.width();
    if width < 2 {
        return Err(TableError::TooFewColumns { found: width }.into());
    }

    let skipped_header = table
        .rows()
        .first()
        .is_some_and(|first| is_header_row(first, profile));
    if skipped_header {
        log_info("Header row detected and skipped");
    }

    let rows = data_rows(table, skipped_header);
    if rows.is_empty() {
        return Err(TableError::NoDataRows.into());
    }
    log_info(format!("{} data rows, {} columns", rows.len(), width));

    let detection = detect_columns(&rows, width, options.sample_rows, profile)?;
    log_success(&detection.detection_info);
    for signal in &detection.signals {
        if detection.assignment.ignored_cols.contains(&signal.col) {
            if let Some(reason) = ignore_reason(signal) {
                log_info_indent(format!("Col {} ignored: {}", signal.col + 1, reason), 1);
            }
        }
    }

    let columns = ResolvedColumns::from_assignment(&detection.assignment, profile)?;

    let extraction = extract_words(&rows, columns, profile);
    log_success(extraction.summary());
    if !extraction.duplicates.is_empty() {
        log_warning(format!(
            "Duplicates skipped: {}",
            extraction.duplicates.join(", ")
        ));
    }
    for err in extraction.errors.iter().take(5) {
        log_warning(err);
    }

    let found = extraction.words.len();
    if found < options.min_words {
        return Err(ImportError::TooFewWords {
            found,
            min: options.min_words,
        });
    }
    if found > options.max_words {
        return Err(ImportError::TooManyWords {
            found,
            max: options.max_words,
        });
    }

    Ok(ParseResult {
        words: extraction.words,
        errors: extraction.errors,
        duplicates: extraction.duplicates,
        total_rows: rows.len(),
        skipped_header,
        detection_info: detection.detection_info,
    })
}

/// Import a word-list file (size/extension checks, encoding + delimiter detection).
pub fn import_file(path: impl AsRef<Path>, options: &ImportOptions) -> ImportResult<ImportOutcome> {
    let path = path.as_ref();
    log_info(format!("Reading {}", path.display()));
    let decoded = parse_file_auto(path)?;
    import_decoded(decoded, options)
}

/// Import uploaded bytes. Size and extension checks are the caller's job.
pub fn import_bytes(bytes: &[u8], options: &ImportOptions) -> ImportResult<ImportOutcome> {
    let decoded = parse_bytes_auto(bytes)?;
    import_decoded(decoded, options)
}

fn import_decoded(decoded: DecodedTable, options: &ImportOptions) -> ImportResult<ImportOutcome> {
    log_success(format!("Detected encoding: {}", decoded.encoding));
    log_success(format!(
        "Detected separator: '{}'",
        format_delimiter(decoded.delimiter)
    ));

    let result = import_table(&decoded.table, options)?;

    Ok(ImportOutcome {
        result,
        file_info: FileInfo {
            encoding: decoded.encoding,
            delimiter: decoded.delimiter,
            row_count: decoded.table.len(),
        },
    })
}

/// Decode a file and report the detected column roles.
pub fn inspect_file(path: impl AsRef<Path>, options: &ImportOptions) -> ImportResult<Inspection> {
    let decoded = parse_file_auto(path)?;
    let table = &decoded.table;
    let profile = &options.profile;

    let skipped_header = table
        .rows()
        .first()
        .is_some_and(|first| is_header_row(first, profile));
    let rows = data_rows(table, skipped_header);
    if rows.is_empty() {
        return Err(TableError::NoDataRows.into());
    }
    let detection = detect_columns(&rows, table.width(), options.sample_rows, profile)?;

    Ok(Inspection {
        file_info: FileInfo {
            encoding: decoded.encoding.clone(),
            delimiter: decoded.delimiter,
            row_count: table.len(),
        },
        skipped_header,
        data_rows: rows.len(),
        detection,
    })
}

/// Format delimiter for display
pub fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "TAB".to_string(),
        c => c.to_string(),
    }
}
