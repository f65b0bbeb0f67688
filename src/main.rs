use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;

use racesheet::application::ports::{Converter, JobDispatcher};
use racesheet::application::services::{ChannelConversionRunner, ConversionWorker, JobOrchestrator};
use racesheet::infrastructure::conversion::PdfTextConverter;
use racesheet::infrastructure::dispatch::{InProcessDispatcher, PgConversionQueue};
use racesheet::infrastructure::observability::{TracingConfig, init_tracing};
use racesheet::infrastructure::persistence::JobRepositoryFactory;
use racesheet::infrastructure::storage::BlobStoreFactory;
use racesheet::presentation::config::DispatchModeSetting;
use racesheet::presentation::{AppState, Environment, Settings, create_router, shutdown_signal};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(
        TracingConfig::from_settings(&settings.logging, environment),
        "api",
    );

    let store = JobRepositoryFactory::create(&settings.database)
        .await
        .context("Failed to initialize job store")?;
    let job_repository = store.repository;
    let blob_store =
        BlobStoreFactory::create(&settings.storage).context("Failed to initialize blob store")?;

    let dispatcher: Arc<dyn JobDispatcher>;
    let mut receiver = None;
    match settings.dispatch.mode {
        DispatchModeSetting::InProcess => {
            let (in_process, rx) = InProcessDispatcher::channel(settings.dispatch.channel_capacity);
            dispatcher = Arc::new(in_process);
            receiver = Some(rx);
        }
        DispatchModeSetting::PgQueue => {
            let pool = store
                .pool
                .clone()
                .context("dispatch.mode = pg_queue requires database.provider = postgres")?;
            dispatcher = Arc::new(PgConversionQueue::new(pool));
        }
    }

    let orchestrator = Arc::new(JobOrchestrator::new(
        Arc::clone(&job_repository),
        Arc::clone(&blob_store),
        dispatcher,
    ));

    if let Some(receiver) = receiver {
        let converter: Arc<dyn Converter> = Arc::new(PdfTextConverter::new());
        let worker = Arc::new(ConversionWorker::new(
            Arc::clone(&job_repository),
            Arc::clone(&blob_store),
            converter,
            Arc::clone(&orchestrator),
            Duration::from_secs(settings.conversion.timeout_secs),
        ));
        let runner = ChannelConversionRunner::new(
            receiver,
            worker,
            settings.dispatch.max_concurrent_conversions,
        );
        tokio::spawn(runner.run());
    } else {
        tracing::info!("Conversions are handled by racesheet-worker");
    }

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server host or port")?;

    let state = AppState {
        orchestrator,
        job_repository,
        blob_store,
        settings,
    };

    let router = create_router(state);

    tracing::info!(environment = %environment, "Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
