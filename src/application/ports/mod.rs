mod blob_store;
mod converter;
mod job_dispatcher;
mod job_repository;
mod repository_error;

pub use blob_store::{BlobStore, BlobStoreError};
pub use converter::{ConversionError, Converter};
pub use job_dispatcher::{ConversionQueue, DispatchError, JobDispatcher};
pub use job_repository::JobRepository;
pub use repository_error::RepositoryError;
