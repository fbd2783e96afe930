//! HTTP Server for the lexload API.
//!
//! Provides the upload endpoint consumed by the word-list UI.
//!
//! # API Endpoints
//!
//! | Method | Path              | Description                          |
//! |--------|-------------------|--------------------------------------|
//! | GET    | `/health`         | Health check                         |
//! | POST   | `/api/upload`     | Upload a word list for import        |
//! | GET    | `/api/logs`       | SSE stream for real-time logs        |

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{header, Method, StatusCode},
    response::{sse::Event, Json, Sse},
    routing::{get, post},
    Router,
};
use futures::stream::Stream;
use serde_json::{json, Value};
use std::{convert::Infallible, net::SocketAddr, sync::Arc, time::Duration};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::CorsLayer;

use super::logs::{log_error, log_info, LOG_BROADCASTER};
use super::types::{error_response, UploadResponse};
use crate::config::ImportOptions;
use crate::error::{CsvError, ImportError, ServerError, ServerResult};
use crate::import::pipeline::import_bytes;
use crate::parser::{check_upload, MAX_FILE_SIZE};

type ApiError = (StatusCode, Json<Value>);

/// Start the HTTP server
pub async fn start_server(port: u16, options: ImportOptions) -> Result<(), Box<dyn std::error::Error>> {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE]);

    let app = router(Arc::new(options)).layer(cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    println!("🚀 Lexload server running on http://localhost:{}", port);
    println!("   POST /api/upload - Upload a word list");
    println!("   GET  /api/logs   - SSE log stream");
    println!("   GET  /health     - Health check");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(options: Arc<ImportOptions>) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/api/upload", post(upload_words))
        .route("/api/logs", get(sse_logs))
        // Multipart framing on top of the largest accepted file.
        .layer(DefaultBodyLimit::max(MAX_FILE_SIZE + 64 * 1024))
        .with_state(options)
}

/// Health check endpoint
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "lexload",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "upload": "POST /api/upload",
            "logs": "GET /api/logs (SSE)"
        }
    }))
}

/// SSE endpoint for real-time log streaming
async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = LOG_BROADCASTER.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(entry) => {
            let json = serde_json::to_string(&entry).ok()?;
            Some(Ok(Event::default().data(json)))
        }
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// Map a server error to an HTTP status and JSON body.
fn into_api_error(err: ServerError) -> ApiError {
    let status = match &err {
        ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
        ServerError::Import(e) if e.is_content_error() => StatusCode::UNPROCESSABLE_ENTITY,
        ServerError::Import(ImportError::Csv(CsvError::FileTooLarge { .. })) => {
            StatusCode::PAYLOAD_TOO_LARGE
        }
        ServerError::Import(ImportError::Csv(CsvError::IoError(_))) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        ServerError::Import(_) => StatusCode::BAD_REQUEST,
    };

    let message = match err {
        ServerError::Import(inner) => inner.to_string(),
        other => other.to_string(),
    };
    log_error(&message);
    (status, Json(error_response(&message)))
}

/// Upload endpoint: multipart field `file`.
async fn upload_words(
    State(options): State<Arc<ImportOptions>>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let (file_name, bytes) = read_file_field(multipart).await.map_err(into_api_error)?;

    log_info(format!(
        "New upload: {} ({} bytes)",
        file_name.as_deref().unwrap_or("unknown"),
        bytes.len()
    ));

    check_upload(file_name.as_deref(), bytes.len())
        .map_err(|e| into_api_error(ImportError::from(e).into()))?;

    let outcome = import_bytes(&bytes, &options).map_err(|e| into_api_error(e.into()))?;

    Ok(Json(UploadResponse::new(outcome, file_name)))
}

async fn read_file_field(mut multipart: Multipart) -> ServerResult<(Option<String>, Vec<u8>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::BadRequest(format!("Multipart error: {}", e)))?
    {
        if field.name() == Some("file") {
            let file_name = field.file_name().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ServerError::BadRequest(format!("Read error: {}", e)))?;
            return Ok((file_name, bytes.to_vec()));
        }
    }

    Err(ServerError::BadRequest("No file provided".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TableError;

    #[test]
    fn test_status_mapping() {
        let (status, _) = into_api_error(ServerError::BadRequest("No file provided".into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let too_large = ImportError::from(CsvError::FileTooLarge {
            size: MAX_FILE_SIZE + 1,
            max_mb: 5,
        });
        let (status, _) = into_api_error(too_large.into());
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);

        let unsupported = ImportError::from(CsvError::UnsupportedFileType {
            extension: "xlsx".into(),
        });
        let (status, _) = into_api_error(unsupported.into());
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, Json(body)) = into_api_error(ImportError::from(TableError::NoDataRows).into());
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "No data rows found in the file.");
    }
}
