use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::application::ports::{JobRepository, RepositoryError};
use crate::domain::{Job, JobId, JobPage, JobStatus, JobTransitionError, PageRequest};

/// Process-local job store with the same compare-and-set semantics as Postgres.
#[derive(Default)]
pub struct InMemoryJobRepository {
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    next_sequence: u64,
    jobs: HashMap<JobId, (u64, Job)>,
}

impl InMemoryJobRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl JobRepository for InMemoryJobRepository {
    async fn insert(&self, job: &Job) -> Result<JobId, RepositoryError> {
        let mut state = self.state.write().await;
        if state.jobs.contains_key(&job.id) {
            return Err(RepositoryError::ConstraintViolation(format!(
                "job {} already exists",
                job.id
            )));
        }

        let sequence = state.next_sequence;
        state.next_sequence += 1;
        state.jobs.insert(job.id, (sequence, job.clone()));
        Ok(job.id)
    }

    async fn get_by_id(&self, id: JobId) -> Result<Option<Job>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.jobs.get(&id).map(|(_, job)| job.clone()))
    }

    async fn list(&self, page: PageRequest) -> Result<JobPage, RepositoryError> {
        let state = self.state.read().await;

        let mut entries: Vec<&(u64, Job)> = state.jobs.values().collect();
        entries.sort_by(|(seq_a, a), (seq_b, b)| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| seq_b.cmp(seq_a))
        });

        let rows = entries
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit as usize + 1)
            .map(|(_, job)| job.clone())
            .collect();

        Ok(JobPage::from_lookahead(rows, page.limit))
    }

    async fn update_status(
        &self,
        id: JobId,
        status: JobStatus,
        download_url: Option<&str>,
        completed_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;
        let (_, job) = state
            .jobs
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::NotFound(format!("job {}", id)))?;

        job.settle(status, download_url.map(String::from), completed_at)
            .map_err(|e| match e {
                JobTransitionError::IllegalTransition { from, .. } if from.is_terminal() => {
                    RepositoryError::Conflict(format!("job {} is already {}", id, from))
                }
                other => RepositoryError::ConstraintViolation(other.to_string()),
            })
    }

    async fn delete(&self, id: JobId) -> Result<Job, RepositoryError> {
        let mut state = self.state.write().await;
        state
            .jobs
            .remove(&id)
            .map(|(_, job)| job)
            .ok_or_else(|| RepositoryError::NotFound(format!("job {}", id)))
    }
}
