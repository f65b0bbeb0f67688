use std::io;

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use futures::{StreamExt, TryStreamExt};
use serde::Serialize;

use crate::application::ports::BlobStoreError;
use crate::domain::StoragePath;
use crate::presentation::handlers::responses::error_response;
use crate::presentation::state::AppState;

const PDF_MIME: &str = "application/pdf";

#[derive(Serialize)]
pub struct UploadResponse {
    pub pdf_path: String,
    pub size_bytes: u64,
}

/// Streams the first file part of a multipart body into the blob store.
#[tracing::instrument(skip(state, multipart))]
pub async fn upload_pdf_handler(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let field = loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.file_name().is_some() => break field,
            Ok(Some(_)) => continue,
            Ok(None) => {
                tracing::warn!("Upload request with no file");
                return error_response(StatusCode::BAD_REQUEST, "No file uploaded");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read multipart");
                return error_response(e.status(), e.body_text());
            }
        }
    };

    let filename = field.file_name().unwrap_or("document.pdf").to_string();
    let content_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();

    if !is_pdf(&content_type, &filename) {
        tracing::warn!(content_type = %content_type, filename = %filename, "Rejected non-PDF upload");
        return error_response(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            format!("Unsupported content type: {}", content_type),
        );
    }

    let path = StoragePath::upload(&filename);
    let max_bytes = state.settings.storage.max_upload_size_bytes;
    let stream = field
        .map_err(|e| io::Error::other(e.to_string()))
        .boxed();

    match state.blob_store.upload_stream(&path, stream, max_bytes).await {
        Ok(size_bytes) => {
            tracing::info!(path = %path, size_bytes, "PDF uploaded");
            (
                StatusCode::CREATED,
                Json(UploadResponse {
                    pdf_path: path.as_str().to_string(),
                    size_bytes,
                }),
            )
                .into_response()
        }
        Err(BlobStoreError::TooLarge { limit }) => error_response(
            StatusCode::PAYLOAD_TOO_LARGE,
            format!("File exceeds {} bytes", limit),
        ),
        Err(BlobStoreError::Io(e)) => {
            tracing::warn!(error = %e, "Upload stream interrupted");
            error_response(StatusCode::BAD_REQUEST, format!("Failed to read file: {}", e))
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to store upload");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Storage error: {}", e),
            )
        }
    }
}

fn is_pdf(content_type: &str, filename: &str) -> bool {
    content_type.starts_with(PDF_MIME)
        || (content_type == "application/octet-stream"
            && filename.to_lowercase().ends_with(".pdf"))
}
