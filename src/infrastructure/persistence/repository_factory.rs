use std::sync::Arc;

use sqlx::PgPool;

use crate::application::ports::{JobRepository, RepositoryError};
use crate::presentation::config::{DatabaseProviderSetting, DatabaseSettings};

use super::pg_pool::{create_pool, run_migrations};
use super::repositories::{InMemoryJobRepository, PgJobRepository};

/// A constructed job store plus the pool behind it, when there is one.
pub struct JobStore {
    pub repository: Arc<dyn JobRepository>,
    pub pool: Option<PgPool>,
}

pub struct JobRepositoryFactory;

impl JobRepositoryFactory {
    pub async fn create(settings: &DatabaseSettings) -> Result<JobStore, RepositoryError> {
        match settings.provider {
            DatabaseProviderSetting::Postgres => {
                let pool = create_pool(&settings.url, settings.max_connections).await?;
                if settings.run_migrations {
                    run_migrations(&pool).await?;
                }
                Ok(JobStore {
                    repository: Arc::new(PgJobRepository::new(pool.clone())),
                    pool: Some(pool),
                })
            }
            DatabaseProviderSetting::Memory => {
                tracing::warn!("Using in-memory job store; jobs are lost on restart");
                Ok(JobStore {
                    repository: Arc::new(InMemoryJobRepository::new()),
                    pool: None,
                })
            }
        }
    }
}
