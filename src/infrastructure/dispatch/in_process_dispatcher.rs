use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use crate::application::ports::{DispatchError, JobDispatcher};
use crate::domain::ConversionRequest;

/// Dispatches onto a bounded channel consumed by a worker task in this process.
#[derive(Clone)]
pub struct InProcessDispatcher {
    sender: mpsc::Sender<ConversionRequest>,
}

impl InProcessDispatcher {
    pub fn new(sender: mpsc::Sender<ConversionRequest>) -> Self {
        Self { sender }
    }

    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<ConversionRequest>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self::new(sender), receiver)
    }
}

#[async_trait]
impl JobDispatcher for InProcessDispatcher {
    async fn dispatch(&self, request: ConversionRequest) -> Result<(), DispatchError> {
        self.sender.try_send(request).map_err(|e| match e {
            TrySendError::Full(_) => DispatchError::QueueFull,
            TrySendError::Closed(_) => DispatchError::WorkerUnavailable,
        })
    }
}
