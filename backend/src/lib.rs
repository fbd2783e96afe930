//! # Lexload - vocabulary list import with column auto-detection
//!
//! Lexload reads user-supplied word lists (CSV/TSV exports of arbitrary
//! spreadsheets) and works out which column holds the English headword,
//! which holds the phonetic transcription and which holds the Turkmen
//! translation. Everything else is ignored.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  CSV / TSV  │────▶│   Parser    │────▶│  Detection  │────▶│   Import    │
//! │  (any enc)  │     │  (auto-enc) │     │ (col roles) │     │ (words+errs)│
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use lexload::{import_file, ImportOptions};
//!
//! let outcome = import_file("words.csv", &ImportOptions::default())?;
//! println!("{}", outcome.result.detection_info);
//! println!("Imported {} words", outcome.result.words.len());
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`config`] - Import options and the target-language profile
//! - [`models`] - Tables, column roles, extracted words
//! - [`parser`] - File intake with encoding/delimiter auto-detection
//! - [`detection`] - Header detection, column signals, role resolution
//! - [`import`] - Row extraction and the end-to-end pipeline
//! - [`api`] - HTTP API server

// Core modules
pub mod config;
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Column detection
pub mod detection;

// Extraction + pipeline
pub mod import;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{CsvError, DetectionError, ImportError, ServerError, TableError};

// =============================================================================
// Re-exports - Config
// =============================================================================

pub use config::{ImportOptions, LanguageProfile};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    ColumnRole, DataRow, ExtractedWord, ParseResult, RawTable, RoleAssignment,
    TRANSCRIPTION_PLACEHOLDER,
};

// =============================================================================
// Re-exports - CSV Parsing
// =============================================================================

pub use parser::{
    check_upload, decode_content, detect_delimiter, detect_encoding, parse_bytes_auto,
    parse_file_auto, parse_table, DecodedTable,
};

// =============================================================================
// Re-exports - Detection
// =============================================================================

pub use detection::{
    detect_columns, is_header_row, resolve_roles, score_columns, ColumnSignal, Detection,
};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use import::{
    extract_words, format_delimiter, import_bytes, import_file, import_table, inspect_file,
    Extraction, FileInfo, ImportOutcome, Inspection,
};

// =============================================================================
// Re-exports - API
// =============================================================================

pub use api::types::{error_response, UploadMetadata, UploadResponse};

// Server
pub mod server {
    pub use crate::api::server::start_server;
}
