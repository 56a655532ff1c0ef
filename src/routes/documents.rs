//! Document upload endpoint
//!
//! - POST /documents - Upload a PDF, extract its text and make it current

use axum::{
    body::Bytes,
    extract::{
        multipart::{MultipartError, MultipartRejection},
        DefaultBodyLimit, Multipart, State,
    },
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::Serialize;

use crate::error::{ApiError, AppError};
use crate::state::AppState;

/// Filename used when the multipart part does not carry one
const DEFAULT_FILENAME: &str = "unknown.pdf";

/// Upload response
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
    pub document_id: String,
    pub filename: String,
    pub page_count: usize,
    pub character_count: usize,
}

/// Create the documents router
///
/// The body limit is twice the accepted file size, so moderately oversized
/// uploads are read in full and rejected by validation with a size message.
pub fn router(state: &AppState) -> Router<AppState> {
    let max_bytes = state.config().upload.max_file_size_bytes();
    let body_limit = usize::try_from(max_bytes.saturating_mul(2)).unwrap_or(usize::MAX);

    Router::new()
        .route("/documents", post(upload_document))
        .layer(DefaultBodyLimit::max(body_limit))
}

/// POST /documents
async fn upload_document(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut multipart = multipart.map_err(|e| {
        tracing::warn!("Rejected non-multipart upload: {}", e);
        state.reject(AppError::Validation(format!(
            "Expected a multipart/form-data upload: {}",
            e.body_text()
        )))
    })?;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::warn!("Failed to read multipart field: {}", e);
        state.reject(read_error(&state, e))
    })? {
        let name = field.name().unwrap_or("").to_string();
        if name != "file" && name != "document" {
            tracing::debug!("Skipping multipart field '{}'", name);
            continue;
        }

        let filename = field
            .file_name()
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .unwrap_or_else(|| DEFAULT_FILENAME.to_string());

        let data = field.bytes().await.map_err(|e| {
            tracing::warn!("Failed to read file data: {}", e);
            state.reject(read_error(&state, e))
        })?;

        return ingest(&state, filename, data)
            .await
            .map(Json)
            .map_err(|e| state.reject(e));
    }

    tracing::warn!("No file field found in multipart upload");
    Err(state.reject(AppError::Validation(
        "No file provided. Use field name 'file'".to_string(),
    )))
}

/// Map a multipart read failure to a validation error
///
/// Bodies cut off by the body limit are reported with the configured size.
fn read_error(state: &AppState, err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::Validation(format!(
            "File too large. Maximum size is {}MB",
            state.config().upload.max_file_size_mb
        ));
    }
    AppError::Validation(format!("Failed to read upload: {}", err))
}

/// Validate, extract and store one uploaded file
async fn ingest(state: &AppState, filename: String, data: Bytes) -> Result<UploadResponse, AppError> {
    let max_size_mb = state.config().upload.max_file_size_mb;

    state
        .extractor()
        .validate(&filename, data.len() as u64, max_size_mb)
        .map_err(|e| {
            tracing::info!(filename = %filename, size = data.len(), "Upload rejected: {}", e);
            e
        })?;

    let extracted = state.extractor().extract_blocking(data.to_vec()).await?;

    let document = state
        .store()
        .store(filename, extracted.text, extracted.page_count)
        .await;

    tracing::info!(
        document_id = %document.id,
        filename = %document.filename,
        page_count = document.page_count,
        character_count = document.character_count,
        "Document uploaded"
    );

    Ok(UploadResponse {
        success: true,
        message: "Document uploaded and processed successfully".to_string(),
        document_id: document.id.clone(),
        filename: document.filename.clone(),
        page_count: document.page_count,
        character_count: document.character_count,
    })
}
