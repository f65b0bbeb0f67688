use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::{BlobStore, BlobStoreError};
use crate::presentation::config::{StorageProviderSetting, StorageSettings};

use super::object_blob_store::ObjectBlobStore;

pub struct BlobStoreFactory;

impl BlobStoreFactory {
    pub fn create(settings: &StorageSettings) -> Result<Arc<dyn BlobStore>, BlobStoreError> {
        match settings.provider {
            StorageProviderSetting::Local => {
                let path = PathBuf::from(&settings.local_path);
                tracing::info!(path = %settings.local_path, "Using local blob store");
                Ok(Arc::new(ObjectBlobStore::local(path)?))
            }
            StorageProviderSetting::Azure => {
                let account = settings.azure_account.as_deref().ok_or_else(|| {
                    BlobStoreError::Configuration("azure_account required".into())
                })?;
                let key = settings.azure_access_key.as_deref().ok_or_else(|| {
                    BlobStoreError::Configuration("azure_access_key required".into())
                })?;
                let container = settings.azure_container.as_deref().ok_or_else(|| {
                    BlobStoreError::Configuration("azure_container required".into())
                })?;
                tracing::info!(account, container, "Using Azure blob store");
                Ok(Arc::new(ObjectBlobStore::azure(account, key, container)?))
            }
            StorageProviderSetting::Memory => {
                tracing::warn!("Using in-memory blob store; objects are lost on restart");
                Ok(Arc::new(ObjectBlobStore::in_memory()))
            }
        }
    }
}
