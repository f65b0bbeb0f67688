mod create_job;
mod delete_job;
mod download_job;
mod get_job;
mod health;
mod list_jobs;
mod responses;
mod upload_pdf;

pub use create_job::{CreateJobRequest, create_job_handler};
pub use delete_job::delete_job_handler;
pub use download_job::download_job_handler;
pub use get_job::get_job_handler;
pub use health::health_handler;
pub use list_jobs::{JobListResponse, ListJobsParams, list_jobs_handler};
pub use responses::{ErrorResponse, JobResponse};
pub use upload_pdf::{UploadResponse, upload_pdf_handler};
