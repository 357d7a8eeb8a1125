#[cfg(feature = "storage-local")]
use crate::LocalStorage;
#[cfg(feature = "storage-s3")]
use crate::S3Storage;
use crate::{MemoryStorage, Storage, StorageBackend, StorageError, StorageResult};
use std::sync::Arc;
use tubely_core::Config;

/// Create the thumbnail store selected by `THUMBNAIL_STORAGE`
pub async fn create_thumbnail_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    match config.storage.thumbnail_backend {
        StorageBackend::Memory => Ok(Arc::new(MemoryStorage::new(
            config.memory_thumbnails_base_url(),
        ))),
        StorageBackend::Local => create_local_storage(config).await,
        StorageBackend::S3 => Err(StorageError::ConfigError(
            "Thumbnails cannot be stored in S3; use 'local' or 'memory'".to_string(),
        )),
    }
}

/// Create the video store selected by `VIDEO_STORAGE`
pub async fn create_video_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    match config.storage.video_backend {
        #[cfg(feature = "storage-s3")]
        StorageBackend::S3 => {
            let bucket = config
                .storage
                .s3_bucket
                .clone()
                .ok_or_else(|| StorageError::ConfigError("S3_BUCKET not configured".to_string()))?;
            let region = config.storage.s3_region.clone().ok_or_else(|| {
                StorageError::ConfigError("S3_REGION or AWS_REGION not configured".to_string())
            })?;
            let endpoint = config.storage.s3_endpoint.clone();

            let storage = S3Storage::new(bucket, region, endpoint).await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-s3"))]
        StorageBackend::S3 => Err(StorageError::ConfigError(
            "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
        )),

        StorageBackend::Local => create_local_storage(config).await,

        StorageBackend::Memory => Err(StorageError::ConfigError(
            "Videos cannot be stored in memory; use 's3' or 'local'".to_string(),
        )),
    }
}

#[cfg(feature = "storage-local")]
async fn create_local_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    let storage =
        LocalStorage::new(config.storage.assets_root.clone(), config.assets_base_url()).await?;
    Ok(Arc::new(storage))
}

#[cfg(not(feature = "storage-local"))]
async fn create_local_storage(_config: &Config) -> StorageResult<Arc<dyn Storage>> {
    Err(StorageError::ConfigError(
        "Local storage backend not available (storage-local feature not enabled)".to_string(),
    ))
}
