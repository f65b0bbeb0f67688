use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::ports::RepositoryError;
use crate::application::services::OrchestratorError;
use crate::domain::Job;

#[derive(Debug, Serialize)]
pub struct JobResponse {
    pub id: String,
    pub title: String,
    pub pdf_path: String,
    pub status: String,
    pub download_url: Option<String>,
    pub created_at: String,
    pub completed_at: Option<String>,
}

impl From<Job> for JobResponse {
    fn from(job: Job) -> Self {
        Self {
            id: job.id.to_string(),
            title: job.title,
            pdf_path: job.pdf_path.as_str().to_string(),
            status: job.status.as_str().to_string(),
            download_url: job.download_url,
            created_at: job.created_at.to_rfc3339(),
            completed_at: job.completed_at.map(|t| t.to_rfc3339()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

pub fn repository_error_response(error: RepositoryError) -> Response {
    match error {
        RepositoryError::NotFound(detail) => error_response(StatusCode::NOT_FOUND, detail),
        RepositoryError::ConnectionFailed(_) => {
            tracing::error!(error = %error, "Job store unavailable");
            error_response(StatusCode::SERVICE_UNAVAILABLE, "Job store unavailable")
        }
        other => {
            tracing::error!(error = %other, "Job store request failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Job store error: {}", other),
            )
        }
    }
}

pub fn orchestrator_error_response(error: OrchestratorError) -> Response {
    match error {
        OrchestratorError::Validation(message) => {
            tracing::warn!(message = %message, "Rejected invalid job request");
            error_response(StatusCode::BAD_REQUEST, message)
        }
        OrchestratorError::NotFound(job_id) => {
            error_response(StatusCode::NOT_FOUND, format!("Job not found: {}", job_id))
        }
        OrchestratorError::Repository(e) => repository_error_response(e),
        OrchestratorError::Dispatch(e) => {
            tracing::error!(error = %e, "Conversion dispatch unavailable");
            error_response(
                StatusCode::SERVICE_UNAVAILABLE,
                "Conversion queue full or worker unavailable",
            )
        }
    }
}
