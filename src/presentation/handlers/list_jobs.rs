use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::domain::PageRequest;
use crate::presentation::handlers::responses::{
    JobResponse, error_response, repository_error_response,
};
use crate::presentation::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListJobsParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Serialize)]
pub struct JobListResponse {
    pub data: Vec<JobResponse>,
    pub page: u32,
    pub limit: u32,
    pub has_next_page: bool,
}

#[tracing::instrument(skip(state, params))]
pub async fn list_jobs_handler(
    State(state): State<AppState>,
    params: Result<Query<ListJobsParams>, QueryRejection>,
) -> Response {
    let params = match params {
        Ok(Query(params)) => params,
        Err(rejection) => return error_response(StatusCode::BAD_REQUEST, rejection.body_text()),
    };

    let pagination = &state.settings.pagination;
    let page = params.page.unwrap_or(1);
    let limit = params
        .limit
        .unwrap_or(pagination.default_limit)
        .min(pagination.max_limit.max(1));

    let Some(request) = PageRequest::new(page, limit) else {
        return error_response(
            StatusCode::BAD_REQUEST,
            "page and limit must be at least 1",
        );
    };

    match state.job_repository.list(request).await {
        Ok(result) => (
            StatusCode::OK,
            Json(JobListResponse {
                data: result.items.into_iter().map(JobResponse::from).collect(),
                page: request.page,
                limit: request.limit,
                has_next_page: result.has_next_page,
            }),
        )
            .into_response(),
        Err(e) => repository_error_response(e),
    }
}
