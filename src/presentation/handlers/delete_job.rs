use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::domain::JobId;
use crate::presentation::handlers::responses::{error_response, orchestrator_error_response};
use crate::presentation::state::AppState;

#[tracing::instrument(skip(state))]
pub async fn delete_job_handler(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Response {
    let Some(id) = JobId::parse(&job_id) else {
        return error_response(StatusCode::NOT_FOUND, format!("Job not found: {}", job_id));
    };

    match state.orchestrator.delete_job(id).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => orchestrator_error_response(e),
    }
}
