use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Semaphore, mpsc};
use tracing::Instrument;

use crate::application::ports::ConversionQueue;
use crate::domain::ConversionRequest;

use super::ConversionWorker;

/// Drives a [`ConversionWorker`] from the in-process dispatch channel.
pub struct ChannelConversionRunner {
    receiver: mpsc::Receiver<ConversionRequest>,
    worker: Arc<ConversionWorker>,
    max_concurrent: usize,
}

impl ChannelConversionRunner {
    pub fn new(
        receiver: mpsc::Receiver<ConversionRequest>,
        worker: Arc<ConversionWorker>,
        max_concurrent: usize,
    ) -> Self {
        Self {
            receiver,
            worker,
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Runs until every dispatcher handle is dropped, then drains in-flight work.
    pub async fn run(mut self) {
        tracing::info!(max_concurrent = self.max_concurrent, "Conversion worker started");
        let permits = Arc::new(Semaphore::new(self.max_concurrent));

        while let Some(request) = self.receiver.recv().await {
            let Ok(permit) = Arc::clone(&permits).acquire_owned().await else {
                break;
            };
            spawn_conversion(Arc::clone(&self.worker), request, permit);
        }

        let _ = permits.acquire_many(self.max_concurrent as u32).await;
        tracing::info!("Conversion worker stopped: channel closed");
    }
}

/// Drives a [`ConversionWorker`] by polling an external queue.
pub struct QueueConversionRunner {
    queue: Arc<dyn ConversionQueue>,
    worker: Arc<ConversionWorker>,
    max_concurrent: usize,
    poll_interval: Duration,
}

impl QueueConversionRunner {
    pub fn new(
        queue: Arc<dyn ConversionQueue>,
        worker: Arc<ConversionWorker>,
        max_concurrent: usize,
        poll_interval: Duration,
    ) -> Self {
        Self {
            queue,
            worker,
            max_concurrent: max_concurrent.max(1),
            poll_interval,
        }
    }

    /// Claims and runs requests until `shutdown` resolves, then drains in-flight work.
    pub async fn run_until<S>(self, shutdown: S)
    where
        S: Future<Output = ()>,
    {
        tracing::info!(
            max_concurrent = self.max_concurrent,
            poll_interval_ms = self.poll_interval.as_millis() as u64,
            "Queue worker started"
        );
        let permits = Arc::new(Semaphore::new(self.max_concurrent));
        tokio::pin!(shutdown);

        loop {
            let permit = tokio::select! {
                _ = &mut shutdown => break,
                permit = Arc::clone(&permits).acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(_) => break,
                },
            };

            match self.queue.claim_next().await {
                Ok(Some(request)) => {
                    spawn_conversion(Arc::clone(&self.worker), request, permit);
                }
                Ok(None) => {
                    drop(permit);
                    tokio::select! {
                        _ = &mut shutdown => break,
                        _ = tokio::time::sleep(self.poll_interval) => {}
                    }
                }
                Err(e) => {
                    drop(permit);
                    tracing::error!(error = %e, "Failed to claim conversion request");
                    tokio::select! {
                        _ = &mut shutdown => break,
                        _ = tokio::time::sleep(self.poll_interval) => {}
                    }
                }
            }
        }

        tracing::info!("Queue worker shutting down, waiting for in-flight conversions");
        let _ = permits.acquire_many(self.max_concurrent as u32).await;
        tracing::info!("Queue worker stopped");
    }
}

fn spawn_conversion(
    worker: Arc<ConversionWorker>,
    request: ConversionRequest,
    permit: tokio::sync::OwnedSemaphorePermit,
) {
    let span = tracing::info_span!(
        "conversion_job",
        job_id = %request.job_id,
        pdf_path = %request.pdf_path,
    );

    tokio::spawn(
        async move {
            match worker.process(request).await {
                Ok(outcome) => tracing::debug!(outcome = ?outcome, "Conversion finished"),
                Err(e) => tracing::error!(error = %e, "Conversion job errored"),
            }
            drop(permit);
        }
        .instrument(span),
    );
}
