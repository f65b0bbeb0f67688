use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

use racesheet::application::ports::{ConversionQueue, Converter, JobDispatcher};
use racesheet::application::services::{ConversionWorker, JobOrchestrator, QueueConversionRunner};
use racesheet::infrastructure::conversion::PdfTextConverter;
use racesheet::infrastructure::dispatch::PgConversionQueue;
use racesheet::infrastructure::observability::{TracingConfig, init_tracing};
use racesheet::infrastructure::persistence::JobRepositoryFactory;
use racesheet::infrastructure::storage::BlobStoreFactory;
use racesheet::presentation::{Environment, Settings, shutdown_signal};

/// Standalone conversion worker draining the Postgres `conversion_queue`.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(
        TracingConfig::from_settings(&settings.logging, environment),
        "worker",
    );

    let store = JobRepositoryFactory::create(&settings.database)
        .await
        .context("Failed to initialize job store")?;
    let pool = store
        .pool
        .context("racesheet-worker requires database.provider = postgres")?;
    let job_repository = store.repository;
    let blob_store =
        BlobStoreFactory::create(&settings.storage).context("Failed to initialize blob store")?;

    let queue = Arc::new(PgConversionQueue::new(pool));
    let dispatcher: Arc<dyn JobDispatcher> = Arc::clone(&queue) as Arc<dyn JobDispatcher>;
    let orchestrator = Arc::new(JobOrchestrator::new(
        Arc::clone(&job_repository),
        Arc::clone(&blob_store),
        dispatcher,
    ));

    let converter: Arc<dyn Converter> = Arc::new(PdfTextConverter::new());
    let worker = Arc::new(ConversionWorker::new(
        job_repository,
        blob_store,
        converter,
        orchestrator,
        Duration::from_secs(settings.conversion.timeout_secs),
    ));

    let runner = QueueConversionRunner::new(
        queue as Arc<dyn ConversionQueue>,
        worker,
        settings.dispatch.max_concurrent_conversions,
        Duration::from_millis(settings.dispatch.poll_interval_ms),
    );

    runner.run_until(shutdown_signal()).await;
    Ok(())
}
