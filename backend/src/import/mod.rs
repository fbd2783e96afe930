//! Import module.
//!
//! This module turns a decoded table into vocabulary words:
//! - Extractor: row validation and deduplication
//! - Pipeline: header detection, column detection, extraction, count bounds

pub mod extractor;
pub mod pipeline;

pub use extractor::{extract_words, Extraction, ResolvedColumns};
pub use pipeline::*;
