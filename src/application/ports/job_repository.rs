use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Job, JobId, JobPage, JobStatus, PageRequest};

use super::RepositoryError;

/// Persistent store of job records.
#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn insert(&self, job: &Job) -> Result<JobId, RepositoryError>;

    async fn get_by_id(&self, id: JobId) -> Result<Option<Job>, RepositoryError>;

    /// Newest first; `has_next_page` comes from fetching one row past the page.
    async fn list(&self, page: PageRequest) -> Result<JobPage, RepositoryError>;

    /// Compare-and-set out of `processing`.
    ///
    /// Fails with [`RepositoryError::NotFound`] when the job does not exist and
    /// with [`RepositoryError::Conflict`] when it has already settled.
    async fn update_status(
        &self,
        id: JobId,
        status: JobStatus,
        download_url: Option<&str>,
        completed_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError>;

    /// Removes the record and returns it as it was at deletion time.
    async fn delete(&self, id: JobId) -> Result<Job, RepositoryError>;
}
