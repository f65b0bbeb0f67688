use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::instrument;
use uuid::Uuid;

use crate::application::ports::{ConversionQueue, DispatchError, JobDispatcher};
use crate::domain::{ConversionRequest, JobId, StoragePath};

/// Work queue backed by the `conversion_queue` table.
///
/// Claiming deletes the row inside the same statement, so each request is
/// delivered to at most one worker.
pub struct PgConversionQueue {
    pool: PgPool,
}

impl PgConversionQueue {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct QueueRow {
    job_id: Uuid,
    pdf_path: String,
}

#[async_trait]
impl JobDispatcher for PgConversionQueue {
    #[instrument(skip(self, request), fields(job_id = %request.job_id))]
    async fn dispatch(&self, request: ConversionRequest) -> Result<(), DispatchError> {
        sqlx::query("INSERT INTO conversion_queue (job_id, pdf_path) VALUES ($1, $2)")
            .bind(request.job_id.as_uuid())
            .bind(request.pdf_path.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DispatchError::EnqueueFailed(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl ConversionQueue for PgConversionQueue {
    async fn claim_next(&self) -> Result<Option<ConversionRequest>, DispatchError> {
        let row = sqlx::query_as::<_, QueueRow>(
            r#"
            DELETE FROM conversion_queue
            WHERE id = (
                SELECT id FROM conversion_queue
                ORDER BY id
                FOR UPDATE SKIP LOCKED
                LIMIT 1
            )
            RETURNING job_id, pdf_path
            "#,
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DispatchError::ClaimFailed(e.to_string()))?;

        Ok(row.map(|r| ConversionRequest {
            job_id: JobId::from_uuid(r.job_id),
            pdf_path: StoragePath::from_raw(r.pdf_path),
        }))
    }
}
