use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use chrono::Utc;

use crate::application::ports::{
    BlobStore, BlobStoreError, ConversionError, Converter, JobRepository, RepositoryError,
};
use crate::domain::{ConversionOutcome, ConversionRequest, StoragePath};

use super::{JobOrchestrator, OrchestratorError, SettleOutcome};

/// Executes one dispatched conversion and reports the outcome.
pub struct ConversionWorker {
    job_repository: Arc<dyn JobRepository>,
    blob_store: Arc<dyn BlobStore>,
    converter: Arc<dyn Converter>,
    orchestrator: Arc<JobOrchestrator>,
    timeout: Duration,
}

impl ConversionWorker {
    pub fn new(
        job_repository: Arc<dyn JobRepository>,
        blob_store: Arc<dyn BlobStore>,
        converter: Arc<dyn Converter>,
        orchestrator: Arc<JobOrchestrator>,
        timeout: Duration,
    ) -> Self {
        Self {
            job_repository,
            blob_store,
            converter,
            orchestrator,
            timeout,
        }
    }

    pub async fn process(
        &self,
        request: ConversionRequest,
    ) -> Result<SettleOutcome, ConversionWorkerError> {
        let job_id = request.job_id;

        match self.job_repository.get_by_id(job_id).await? {
            None => {
                tracing::info!("Job deleted before conversion started, skipping");
                return Ok(SettleOutcome::JobGone);
            }
            Some(job) if job.is_terminal() => {
                tracing::warn!(status = %job.status, "Job already settled, skipping");
                return Ok(SettleOutcome::AlreadySettled);
            }
            Some(_) => {}
        }

        let outcome = match self.run_pipeline(&request).await {
            Ok(Pipeline::Uploaded(download_url)) => ConversionOutcome::Succeeded { download_url },
            Ok(Pipeline::SettledOnTimeout(settled)) => return Ok(settled),
            Err(e) => {
                tracing::error!(error = %e, "Conversion failed");
                ConversionOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        };

        let settled = self
            .orchestrator
            .handle_conversion_result(job_id, outcome)
            .await?;
        Ok(settled)
    }

    async fn run_pipeline(
        &self,
        request: &ConversionRequest,
    ) -> Result<Pipeline, ConversionWorkerError> {
        tracing::debug!(pdf_path = %request.pdf_path, "Downloading source PDF");
        let pdf = self
            .blob_store
            .download(&request.pdf_path)
            .await
            .map_err(ConversionWorkerError::Blob)?;

        tracing::debug!(bytes = pdf.len(), "Converting PDF");
        let conversion = self.converter.convert(&pdf);
        tokio::pin!(conversion);

        let csv = match tokio::time::timeout(self.timeout, &mut conversion).await {
            Ok(result) => result.map_err(ConversionWorkerError::Conversion)?,
            Err(_) => {
                let error = ConversionWorkerError::TimedOut(self.timeout);
                tracing::error!(error = %error, "Conversion failed");
                let settled = self
                    .orchestrator
                    .handle_conversion_result(
                        request.job_id,
                        ConversionOutcome::failure(error.to_string()),
                    )
                    .await?;
                // Extraction cannot be cancelled; hold the caller's slot until it ends.
                let _ = conversion.await;
                tracing::warn!("Timed-out conversion finished");
                return Ok(Pipeline::SettledOnTimeout(settled));
            }
        };

        let csv_path = StoragePath::csv_output(request.job_id, Utc::now());
        tracing::debug!(csv_path = %csv_path, bytes = csv.len(), "Uploading CSV");
        self.blob_store
            .upload(&csv_path, Bytes::from(csv))
            .await
            .map(Pipeline::Uploaded)
            .map_err(ConversionWorkerError::Blob)
    }
}

enum Pipeline {
    Uploaded(String),
    /// The job was failed at the deadline; the conversion has since drained.
    SettledOnTimeout(SettleOutcome),
}

#[derive(Debug, thiserror::Error)]
pub enum ConversionWorkerError {
    #[error("blob store: {0}")]
    Blob(BlobStoreError),
    #[error("conversion: {0}")]
    Conversion(ConversionError),
    #[error("conversion timed out after {0:?}")]
    TimedOut(Duration),
    #[error("repository: {0}")]
    Repository(#[from] RepositoryError),
    #[error("orchestrator: {0}")]
    Orchestrator(#[from] OrchestratorError),
}
