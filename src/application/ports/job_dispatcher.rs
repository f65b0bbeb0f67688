use async_trait::async_trait;

use crate::domain::ConversionRequest;

/// Hands a job off for asynchronous conversion.
///
/// Implementations must return as soon as the request is accepted; they never
/// wait for the conversion itself.
#[async_trait]
pub trait JobDispatcher: Send + Sync {
    async fn dispatch(&self, request: ConversionRequest) -> Result<(), DispatchError>;
}

/// Consumer side of an external work queue.
#[async_trait]
pub trait ConversionQueue: Send + Sync {
    /// Removes and returns the oldest pending request, if any.
    async fn claim_next(&self) -> Result<Option<ConversionRequest>, DispatchError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("conversion queue is full")]
    QueueFull,
    #[error("conversion worker unavailable")]
    WorkerUnavailable,
    #[error("enqueue failed: {0}")]
    EnqueueFailed(String),
    #[error("claim failed: {0}")]
    ClaimFailed(String),
}
