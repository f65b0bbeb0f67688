use std::io;

use bytes::Bytes;
use futures::stream::BoxStream;

use crate::domain::StoragePath;

#[async_trait::async_trait]
pub trait BlobStore: Send + Sync {
    /// Stores `data` at `path` and returns the reference clients use to fetch it.
    async fn upload(&self, path: &StoragePath, data: Bytes) -> Result<String, BlobStoreError>;

    /// Streams a body into `path`, aborting once more than `max_bytes` arrive.
    async fn upload_stream(
        &self,
        path: &StoragePath,
        stream: BoxStream<'_, Result<Bytes, io::Error>>,
        max_bytes: u64,
    ) -> Result<u64, BlobStoreError>;

    async fn download(&self, path: &StoragePath) -> Result<Bytes, BlobStoreError>;

    async fn delete(&self, path: &StoragePath) -> Result<(), BlobStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum BlobStoreError {
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("object not found: {0}")]
    NotFound(String),
    #[error("download failed: {0}")]
    DownloadFailed(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
    #[error("object exceeds {limit} bytes")]
    TooLarge { limit: u64 },
    #[error("store configuration: {0}")]
    Configuration(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
