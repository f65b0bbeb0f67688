use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::presentation::handlers::responses::{
    JobResponse, error_response, orchestrator_error_response,
};
use crate::presentation::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    pub title: Option<String>,
    #[serde(alias = "pdf_url")]
    pub pdf_path: Option<String>,
}

#[tracing::instrument(skip(state, payload))]
pub async fn create_job_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateJobRequest>, JsonRejection>,
) -> Response {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Malformed create job request");
            return error_response(StatusCode::BAD_REQUEST, rejection.body_text());
        }
    };

    let Some(title) = body.title else {
        return error_response(StatusCode::BAD_REQUEST, "title is required");
    };
    let Some(pdf_path) = body.pdf_path else {
        return error_response(StatusCode::BAD_REQUEST, "pdf_path is required");
    };

    match state.orchestrator.create_job(&title, &pdf_path).await {
        Ok(job) => (StatusCode::CREATED, Json(JobResponse::from(job))).into_response(),
        Err(e) => orchestrator_error_response(e),
    }
}
