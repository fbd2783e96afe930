//! Error types for the Lexload import pipeline.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`CsvError`] - File intake and CSV decoding errors
//! - [`TableError`] - The decoded table cannot support detection
//! - [`DetectionError`] - A required column role could not be resolved
//! - [`ImportError`] - Top-level pipeline errors (wraps the above + count bounds)
//! - [`ServerError`] - HTTP layer errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.
//!
//! Row-level problems (empty word, empty translation, duplicates) are not
//! errors: they are collected into [`crate::models::ParseResult`].

use thiserror::Error;

// =============================================================================
// File Intake Errors
// =============================================================================

/// Errors while reading and decoding an uploaded file.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to decode the file contents.
    #[error("Failed to decode file: {0}")]
    EncodingError(String),

    /// Invalid CSV syntax.
    #[error("Invalid CSV format at line {line}: {message}")]
    ParseError { line: u64, message: String },

    /// Empty file.
    #[error("No data found in the file.")]
    EmptyFile,

    /// File exceeds the upload limit.
    #[error("File too large. Maximum file size is {max_mb} MB.")]
    FileTooLarge { size: usize, max_mb: usize },

    /// Extension not accepted by the intake layer.
    #[error("Invalid file type '{extension}'. Please upload a .csv, .tsv or .txt file (export spreadsheets as CSV).")]
    UnsupportedFileType { extension: String },
}

impl From<csv::Error> for CsvError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        CsvError::ParseError {
            line,
            message: err.to_string(),
        }
    }
}

// =============================================================================
// Structural Errors
// =============================================================================

/// The table itself cannot support column detection.
#[derive(Debug, Error, PartialEq)]
pub enum TableError {
    /// Fewer than two columns in the widest row.
    #[error("The file must have at least 2 columns (found {found}).")]
    TooFewColumns { found: usize },

    /// Every row after the header is blank.
    #[error("No data rows found in the file.")]
    NoDataRows,
}

// =============================================================================
// Detection Errors
// =============================================================================

/// A required column role could not be resolved from the column signals.
#[derive(Debug, Error, PartialEq)]
pub enum DetectionError {
    #[error("Could not detect the English word column. Please ensure your file has English words.")]
    EnglishColumn,

    #[error("Could not detect the {language} translation column. Please ensure your file has {language} translations.")]
    TranslationColumn { language: String },
}

// =============================================================================
// Import Errors (top-level)
// =============================================================================

/// Top-level pipeline errors.
///
/// This is the error type returned by [`crate::import::pipeline::import_table`]
/// and the file-based entry points. A failure means no partial result.
#[derive(Debug, Error)]
pub enum ImportError {
    /// File intake error.
    #[error("{0}")]
    Csv(#[from] CsvError),

    /// Structural error.
    #[error("{0}")]
    Table(#[from] TableError),

    /// Detection error.
    #[error("{0}")]
    Detection(#[from] DetectionError),

    /// Accepted word count below the configured minimum.
    #[error("Too few words: found {found}, minimum is {min}. Please add more words to your file.")]
    TooFewWords { found: usize, min: usize },

    /// Accepted word count above the configured maximum.
    #[error("Too many words: found {found}, maximum is {max}. Please reduce the number of words.")]
    TooManyWords { found: usize, max: usize },
}

impl ImportError {
    /// Whether the failure comes from the uploaded content rather than the intake.
    pub fn is_content_error(&self) -> bool {
        !matches!(self, ImportError::Csv(_))
    }
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Pipeline error.
    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    /// Invalid request.
    #[error("Invalid request: {0}")]
    BadRequest(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for intake operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for pipeline operations.
pub type ImportResult<T> = Result<T, ImportError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
