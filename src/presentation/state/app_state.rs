use std::sync::Arc;

use crate::application::ports::{BlobStore, JobRepository};
use crate::application::services::JobOrchestrator;
use crate::presentation::config::Settings;

/// Clients shared by every handler; built once by the process entry point.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<JobOrchestrator>,
    pub job_repository: Arc<dyn JobRepository>,
    pub blob_store: Arc<dyn BlobStore>,
    pub settings: Settings,
}
