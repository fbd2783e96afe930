//! REST API types for the upload endpoint.
//!
//! The UI shows `detectionInfo`, `errors` and `duplicates` from the result
//! before the user commits `words` to storage.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::import::pipeline::{format_delimiter, ImportOutcome};
use crate::models::ParseResult;

/// Response sent after a successful upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Unique job identifier
    pub job_id: String,

    /// "ready" when every row was accepted, "warning" otherwise
    pub status: String,

    /// RFC 3339 time the upload was processed
    pub received_at: String,

    /// Pipeline result
    pub result: ParseResult,

    pub metadata: UploadMetadata,
}

/// Upload metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadMetadata {
    pub file_name: Option<String>,
    pub encoding: String,
    pub delimiter: String,
    pub word_count: usize,
    pub error_count: usize,
    pub duplicate_count: usize,
}

impl UploadResponse {
    pub fn new(outcome: ImportOutcome, file_name: Option<String>) -> Self {
        let result = outcome.result;
        let metadata = UploadMetadata {
            file_name,
            encoding: outcome.file_info.encoding,
            delimiter: format_delimiter(outcome.file_info.delimiter),
            word_count: result.words.len(),
            error_count: result.errors.len(),
            duplicate_count: result.duplicates.len(),
        };

        UploadResponse {
            job_id: Uuid::new_v4().to_string(),
            status: if result.has_warnings() { "warning" } else { "ready" }.to_string(),
            received_at: now_rfc3339(),
            result,
            metadata,
        }
    }
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Create an error response
pub fn error_response(error: &str) -> Value {
    json!({
        "jobId": Uuid::new_v4().to_string(),
        "status": "error",
        "receivedAt": now_rfc3339(),
        "error": error,
        "result": null
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::pipeline::FileInfo;
    use crate::models::ExtractedWord;

    fn outcome(errors: Vec<String>) -> ImportOutcome {
        ImportOutcome {
            result: ParseResult {
                words: vec![ExtractedWord::new("apple", "[ˈæpəl]", "alma")],
                errors,
                duplicates: vec![],
                total_rows: 1,
                skipped_header: false,
                detection_info: "Detected layout: Col 1: English | Col 2: Translation".into(),
            },
            file_info: FileInfo {
                encoding: "utf-8".into(),
                delimiter: '\t',
                row_count: 1,
            },
        }
    }

    #[test]
    fn test_ready_status() {
        let response = UploadResponse::new(outcome(vec![]), Some("words.csv".into()));
        assert_eq!(response.status, "ready");
        assert_eq!(response.metadata.delimiter, "TAB");
        assert_eq!(response.metadata.word_count, 1);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["metadata"]["fileName"], "words.csv");
        assert_eq!(json["result"]["words"][0]["translation"], "alma");
        assert!(json["receivedAt"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn test_warning_status() {
        let response = UploadResponse::new(
            outcome(vec!["Row 3: English word is empty".into()]),
            None,
        );
        assert_eq!(response.status, "warning");
        assert_eq!(response.metadata.error_count, 1);
    }

    #[test]
    fn test_error_response() {
        let body = error_response("Too few words");
        assert_eq!(body["status"], "error");
        assert_eq!(body["error"], "Too few words");
        assert!(body["result"].is_null());
    }
}
