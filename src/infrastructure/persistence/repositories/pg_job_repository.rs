use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::instrument;
use uuid::Uuid;

use crate::application::ports::{JobRepository, RepositoryError};
use crate::domain::{Job, JobId, JobPage, JobStatus, PageRequest, StoragePath};
use crate::infrastructure::persistence::pg_pool::map_sqlx_error;

pub struct PgJobRepository {
    pool: PgPool,
}

impl PgJobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct JobRow {
    id: Uuid,
    title: String,
    pdf_path: String,
    status: String,
    download_url: Option<String>,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl TryFrom<JobRow> for Job {
    type Error = RepositoryError;

    fn try_from(r: JobRow) -> Result<Self, Self::Error> {
        let status = r
            .status
            .parse::<JobStatus>()
            .map_err(RepositoryError::QueryFailed)?;

        Ok(Job {
            id: JobId::from_uuid(r.id),
            title: r.title,
            pdf_path: StoragePath::from_raw(r.pdf_path),
            status,
            download_url: r.download_url,
            created_at: r.created_at,
            completed_at: r.completed_at,
        })
    }
}

#[async_trait]
impl JobRepository for PgJobRepository {
    #[instrument(skip(self, job), fields(job_id = %job.id))]
    async fn insert(&self, job: &Job) -> Result<JobId, RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO jobs (id, title, pdf_path, status, download_url, created_at, completed_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(job.id.as_uuid())
        .bind(&job.title)
        .bind(job.pdf_path.as_str())
        .bind(job.status.as_str())
        .bind(job.download_url.as_deref())
        .bind(job.created_at)
        .bind(job.completed_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(job.id)
    }

    #[instrument(skip(self), fields(job_id = %id))]
    async fn get_by_id(&self, id: JobId) -> Result<Option<Job>, RepositoryError> {
        let row = sqlx::query_as::<_, JobRow>(
            r#"
            SELECT id, title, pdf_path, status, download_url, created_at, completed_at
            FROM jobs
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(Job::try_from).transpose()
    }

    #[instrument(skip(self), fields(page = page.page, limit = page.limit))]
    async fn list(&self, page: PageRequest) -> Result<JobPage, RepositoryError> {
        let rows = sqlx::query_as::<_, JobRow>(
            r#"
            SELECT id, title, pdf_path, status, download_url, created_at, completed_at
            FROM jobs
            ORDER BY created_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(i64::from(page.limit) + 1)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let jobs = rows
            .into_iter()
            .map(Job::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(JobPage::from_lookahead(jobs, page.limit))
    }

    #[instrument(skip(self, download_url), fields(job_id = %id, status = %status))]
    async fn update_status(
        &self,
        id: JobId,
        status: JobStatus,
        download_url: Option<&str>,
        completed_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        if !JobStatus::Processing.can_transition_to(status) {
            return Err(RepositoryError::ConstraintViolation(format!(
                "{} is not a terminal status",
                status
            )));
        }

        let result = sqlx::query(
            r#"
            UPDATE jobs
            SET status = $1, download_url = $2, completed_at = $3
            WHERE id = $4 AND status = 'processing'
            "#,
        )
        .bind(status.as_str())
        .bind(download_url)
        .bind(completed_at)
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 1 {
            return Ok(());
        }

        let current: Option<String> = sqlx::query_scalar("SELECT status FROM jobs WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        match current {
            Some(current) => Err(RepositoryError::Conflict(format!(
                "job {} is already {}",
                id, current
            ))),
            None => Err(RepositoryError::NotFound(format!("job {}", id))),
        }
    }

    #[instrument(skip(self), fields(job_id = %id))]
    async fn delete(&self, id: JobId) -> Result<Job, RepositoryError> {
        let row = sqlx::query_as::<_, JobRow>(
            r#"
            DELETE FROM jobs
            WHERE id = $1
            RETURNING id, title, pdf_path, status, download_url, created_at, completed_at
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        match row {
            Some(r) => Job::try_from(r),
            None => Err(RepositoryError::NotFound(format!("job {}", id))),
        }
    }
}
