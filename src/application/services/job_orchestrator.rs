use std::sync::Arc;

use chrono::Utc;
use tracing::instrument;

use crate::application::ports::{
    BlobStore, BlobStoreError, DispatchError, JobDispatcher, JobRepository, RepositoryError,
};
use crate::domain::{
    ConversionOutcome, ConversionRequest, Job, JobId, JobStatus, MAX_TITLE_LENGTH, StoragePath,
};

/// Result of applying a conversion outcome to a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleOutcome {
    Applied,
    AlreadySettled,
    JobGone,
}

/// Owns the job state machine. Nothing else writes a job's status.
pub struct JobOrchestrator {
    job_repository: Arc<dyn JobRepository>,
    blob_store: Arc<dyn BlobStore>,
    dispatcher: Arc<dyn JobDispatcher>,
}

impl JobOrchestrator {
    pub fn new(
        job_repository: Arc<dyn JobRepository>,
        blob_store: Arc<dyn BlobStore>,
        dispatcher: Arc<dyn JobDispatcher>,
    ) -> Self {
        Self {
            job_repository,
            blob_store,
            dispatcher,
        }
    }

    #[instrument(skip(self, title, pdf_path))]
    pub async fn create_job(&self, title: &str, pdf_path: &str) -> Result<Job, OrchestratorError> {
        let title = title.trim();
        let pdf_path = pdf_path.trim();

        if title.is_empty() {
            return Err(OrchestratorError::Validation(
                "title must not be empty".to_string(),
            ));
        }
        if title.chars().count() > MAX_TITLE_LENGTH {
            return Err(OrchestratorError::Validation(format!(
                "title must be at most {} characters",
                MAX_TITLE_LENGTH
            )));
        }
        if pdf_path.is_empty() {
            return Err(OrchestratorError::Validation(
                "pdf_path must not be empty".to_string(),
            ));
        }

        let job = Job::new(title.to_string(), StoragePath::from_raw(pdf_path));
        let job_id = self.job_repository.insert(&job).await?;

        let request = ConversionRequest {
            job_id,
            pdf_path: job.pdf_path.clone(),
        };

        if let Err(e) = self.dispatcher.dispatch(request).await {
            tracing::error!(job_id = %job_id, error = %e, "Failed to dispatch conversion");
            let outcome = ConversionOutcome::failure(format!("dispatch failed: {}", e));
            if let Err(settle_err) = self.handle_conversion_result(job_id, outcome).await {
                tracing::error!(
                    job_id = %job_id,
                    error = %settle_err,
                    "Failed to mark undispatched job as failed"
                );
            }
            return Err(OrchestratorError::Dispatch(e));
        }

        tracing::info!(
            job_id = %job_id,
            pdf_path = %job.pdf_path,
            "Conversion job dispatched"
        );

        Ok(job)
    }

    /// Applies the outcome of a conversion. Duplicate or late deliveries are
    /// no-ops: the first terminal write wins.
    #[instrument(skip(self, outcome), fields(job_id = %job_id))]
    pub async fn handle_conversion_result(
        &self,
        job_id: JobId,
        outcome: ConversionOutcome,
    ) -> Result<SettleOutcome, OrchestratorError> {
        let (status, download_url) = match &outcome {
            ConversionOutcome::Succeeded { download_url } => {
                (JobStatus::Completed, Some(download_url.as_str()))
            }
            ConversionOutcome::Failed { reason } => {
                tracing::warn!(reason = %reason, "Conversion reported failure");
                (JobStatus::Failed, None)
            }
        };

        match self
            .job_repository
            .update_status(job_id, status, download_url, Utc::now())
            .await
        {
            Ok(()) => {
                tracing::info!(status = %status, "Job settled");
                Ok(SettleOutcome::Applied)
            }
            Err(RepositoryError::Conflict(detail)) => {
                tracing::warn!(
                    attempted = %status,
                    detail = %detail,
                    "Ignoring conversion result for settled job"
                );
                if let ConversionOutcome::Succeeded { download_url } = outcome {
                    self.remove_unreferenced_csv(job_id, download_url).await;
                }
                Ok(SettleOutcome::AlreadySettled)
            }
            Err(RepositoryError::NotFound(_)) => {
                tracing::info!("Ignoring conversion result for deleted job");
                if let ConversionOutcome::Succeeded { download_url } = outcome {
                    self.remove_blob(&StoragePath::from_raw(download_url)).await;
                }
                Ok(SettleOutcome::JobGone)
            }
            Err(e) => Err(OrchestratorError::Repository(e)),
        }
    }

    /// Deletes the record, then its blobs. Blob failures are logged and do
    /// not undo the record deletion.
    #[instrument(skip(self), fields(job_id = %job_id))]
    pub async fn delete_job(&self, job_id: JobId) -> Result<Job, OrchestratorError> {
        let job = match self.job_repository.delete(job_id).await {
            Ok(job) => job,
            Err(RepositoryError::NotFound(_)) => return Err(OrchestratorError::NotFound(job_id)),
            Err(e) => return Err(OrchestratorError::Repository(e)),
        };

        self.remove_blob(&job.pdf_path).await;
        if let Some(csv_path) = &job.download_url {
            self.remove_blob(&StoragePath::from_raw(csv_path.as_str()))
                .await;
        }

        tracing::info!(status = %job.status, "Job deleted");
        Ok(job)
    }

    /// Deletes a CSV from a losing success unless the job already points at it.
    async fn remove_unreferenced_csv(&self, job_id: JobId, download_url: String) {
        match self.job_repository.get_by_id(job_id).await {
            Ok(Some(job)) if job.download_url.as_deref() == Some(download_url.as_str()) => {}
            Ok(_) => self.remove_blob(&StoragePath::from_raw(download_url)).await,
            Err(e) => {
                tracing::warn!(error = %e, csv_path = %download_url, "Could not check CSV ownership, keeping it")
            }
        }
    }

    async fn remove_blob(&self, path: &StoragePath) {
        match self.blob_store.delete(path).await {
            Ok(()) => tracing::debug!(path = %path, "Blob deleted"),
            Err(BlobStoreError::NotFound(_)) => {
                tracing::debug!(path = %path, "Blob already absent")
            }
            Err(e) => tracing::warn!(path = %path, error = %e, "Failed to delete blob"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
    #[error("validation: {0}")]
    Validation(String),
    #[error("job not found: {0}")]
    NotFound(JobId),
    #[error("repository: {0}")]
    Repository(#[from] RepositoryError),
    #[error("dispatch: {0}")]
    Dispatch(#[from] DispatchError),
}
