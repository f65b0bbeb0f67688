use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::application::ports::BlobStoreError;
use crate::domain::{JobId, JobStatus, StoragePath};
use crate::presentation::handlers::responses::{error_response, repository_error_response};
use crate::presentation::state::AppState;

#[tracing::instrument(skip(state))]
pub async fn download_job_handler(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Response {
    let Some(id) = JobId::parse(&job_id) else {
        return error_response(StatusCode::NOT_FOUND, format!("Job not found: {}", job_id));
    };

    let job = match state.job_repository.get_by_id(id).await {
        Ok(Some(job)) => job,
        Ok(None) => {
            return error_response(StatusCode::NOT_FOUND, format!("Job not found: {}", job_id));
        }
        Err(e) => return repository_error_response(e),
    };

    let csv_path = match (job.status, job.download_url) {
        (JobStatus::Completed, Some(url)) => StoragePath::from_raw(url),
        (status, _) => {
            return error_response(
                StatusCode::CONFLICT,
                format!("Job {} has no CSV: status is {}", job_id, status),
            );
        }
    };

    match state.blob_store.download(&csv_path).await {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"job-{}.csv\"", id),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(BlobStoreError::NotFound(path)) => {
            tracing::warn!(path = %path, "CSV missing from blob store");
            error_response(StatusCode::NOT_FOUND, format!("CSV not found: {}", path))
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to download CSV");
            error_response(StatusCode::BAD_GATEWAY, format!("Blob store error: {}", e))
        }
    }
}
