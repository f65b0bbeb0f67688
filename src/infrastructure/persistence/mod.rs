mod pg_pool;
mod repositories;
mod repository_factory;

pub use repositories::InMemoryJobRepository;
pub use repositories::PgJobRepository;
pub use repository_factory::{JobRepositoryFactory, JobStore};

pub use pg_pool::{create_pool, run_migrations};
