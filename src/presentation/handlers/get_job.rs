use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::domain::JobId;
use crate::presentation::handlers::responses::{
    JobResponse, error_response, repository_error_response,
};
use crate::presentation::state::AppState;

/// Serves both the initial fetch and client polling.
#[tracing::instrument(skip(state))]
pub async fn get_job_handler(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Response {
    let Some(id) = JobId::parse(&job_id) else {
        return error_response(StatusCode::NOT_FOUND, format!("Job not found: {}", job_id));
    };

    match state.job_repository.get_by_id(id).await {
        Ok(Some(job)) => (StatusCode::OK, Json(JobResponse::from(job))).into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, format!("Job not found: {}", job_id)),
        Err(e) => repository_error_response(e),
    }
}
