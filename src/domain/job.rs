use chrono::{DateTime, SubsecRound, Utc};

use super::{JobId, JobStatus, StoragePath};

pub const MAX_TITLE_LENGTH: usize = 255;

/// A tracked PDF-to-CSV conversion.
///
/// `completed_at` is `None` exactly while the job is processing, and
/// `download_url` is `Some` exactly when it completed. [`Job::settle`] is the
/// only mutation and preserves both.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub pdf_path: StoragePath,
    pub status: JobStatus,
    pub download_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Job {
    pub fn new(title: String, pdf_path: StoragePath) -> Self {
        Self {
            id: JobId::new(),
            title,
            pdf_path,
            status: JobStatus::Processing,
            download_url: None,
            // Microsecond precision, as stored by Postgres.
            created_at: Utc::now().trunc_subsecs(6),
            completed_at: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn complete(
        &mut self,
        download_url: String,
        completed_at: DateTime<Utc>,
    ) -> Result<(), JobTransitionError> {
        self.settle(JobStatus::Completed, Some(download_url), completed_at)
    }

    pub fn fail(&mut self, completed_at: DateTime<Utc>) -> Result<(), JobTransitionError> {
        self.settle(JobStatus::Failed, None, completed_at)
    }

    /// Moves a processing job into a terminal state.
    pub fn settle(
        &mut self,
        status: JobStatus,
        download_url: Option<String>,
        completed_at: DateTime<Utc>,
    ) -> Result<(), JobTransitionError> {
        if !self.status.can_transition_to(status) {
            return Err(JobTransitionError::IllegalTransition {
                from: self.status,
                to: status,
            });
        }

        match (status, &download_url) {
            (JobStatus::Completed, None) => return Err(JobTransitionError::MissingDownloadUrl),
            (JobStatus::Failed, Some(_)) => return Err(JobTransitionError::UnexpectedDownloadUrl),
            _ => {}
        }

        self.status = status;
        self.download_url = download_url;
        self.completed_at = Some(completed_at);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JobTransitionError {
    #[error("illegal transition from {from} to {to}")]
    IllegalTransition { from: JobStatus, to: JobStatus },
    #[error("a completed job requires a download url")]
    MissingDownloadUrl,
    #[error("a failed job cannot carry a download url")]
    UnexpectedDownloadUrl,
}
