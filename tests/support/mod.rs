use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;

use racesheet::application::ports::{
    BlobStore, ConversionQueue, DispatchError, JobDispatcher, JobRepository,
};
use racesheet::application::services::JobOrchestrator;
use racesheet::domain::{ConversionRequest, StoragePath};
use racesheet::infrastructure::persistence::InMemoryJobRepository;
use racesheet::infrastructure::storage::ObjectBlobStore;

/// Captures dispatched requests without running them.
#[derive(Default)]
pub struct RecordingDispatcher {
    requests: Mutex<Vec<ConversionRequest>>,
}

impl RecordingDispatcher {
    pub fn requests(&self) -> Vec<ConversionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl JobDispatcher for RecordingDispatcher {
    async fn dispatch(&self, request: ConversionRequest) -> Result<(), DispatchError> {
        self.requests.lock().unwrap().push(request);
        Ok(())
    }
}

pub struct FailingDispatcher;

#[async_trait]
impl JobDispatcher for FailingDispatcher {
    async fn dispatch(&self, _request: ConversionRequest) -> Result<(), DispatchError> {
        Err(DispatchError::WorkerUnavailable)
    }
}

/// FIFO queue standing in for `conversion_queue`.
#[derive(Default)]
pub struct MemoryQueue {
    items: Mutex<VecDeque<ConversionRequest>>,
}

impl MemoryQueue {
    pub fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }
}

#[async_trait]
impl JobDispatcher for MemoryQueue {
    async fn dispatch(&self, request: ConversionRequest) -> Result<(), DispatchError> {
        self.items.lock().unwrap().push_back(request);
        Ok(())
    }
}

#[async_trait]
impl ConversionQueue for MemoryQueue {
    async fn claim_next(&self) -> Result<Option<ConversionRequest>, DispatchError> {
        Ok(self.items.lock().unwrap().pop_front())
    }
}

pub struct Fixture {
    pub repository: Arc<dyn JobRepository>,
    pub blob_store: Arc<dyn BlobStore>,
    pub orchestrator: Arc<JobOrchestrator>,
}

impl Fixture {
    pub fn with_dispatcher(dispatcher: Arc<dyn JobDispatcher>) -> Self {
        let repository: Arc<dyn JobRepository> = Arc::new(InMemoryJobRepository::new());
        let blob_store: Arc<dyn BlobStore> = Arc::new(ObjectBlobStore::in_memory());
        let orchestrator = Arc::new(JobOrchestrator::new(
            Arc::clone(&repository),
            Arc::clone(&blob_store),
            dispatcher,
        ));
        Self {
            repository,
            blob_store,
            orchestrator,
        }
    }

    pub async fn put_blob(&self, path: &str, data: &'static [u8]) -> StoragePath {
        let path = StoragePath::from_raw(path);
        self.blob_store
            .upload(&path, Bytes::from_static(data))
            .await
            .unwrap();
        path
    }
}

pub const SAMPLE_PDF: &[u8] = b"%PDF-1.4 sample";
pub const SAMPLE_CSV: &[u8] = b"\"page\",\"line\",\"text\"\n1,1,\"Derby\"\n";
