//! Storage abstraction trait
//!
//! Every backend stores opaque bytes under a caller-chosen key and reports the public URL the
//! asset is reachable at.

use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use std::path::Path;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// An object read back from a backend
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub data: Bytes,
    /// Content type recorded at upload time, when the backend keeps one
    pub content_type: Option<String>,
}

/// Storage abstraction trait
///
/// Writes are all-or-nothing from the caller's point of view: when an upload returns an
/// error, no URL was handed out and the caller must not reference the key.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Store `data` under `storage_key` and return its public URL
    async fn upload_with_key(
        &self,
        storage_key: &str,
        data: Bytes,
        content_type: &str,
    ) -> StorageResult<String>;

    /// Store the contents of a local file under `storage_key` and return its public URL
    ///
    /// The default implementation reads the whole file into memory. Backends that can copy or
    /// stream from disk override it.
    async fn upload_file(
        &self,
        storage_key: &str,
        path: &Path,
        content_type: &str,
    ) -> StorageResult<String> {
        let data = tokio::fs::read(path).await?;
        self.upload_with_key(storage_key, Bytes::from(data), content_type)
            .await
    }

    /// Download an object by its storage key
    async fn download(&self, storage_key: &str) -> StorageResult<StoredObject>;

    /// Check if an object exists
    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;

    /// Public URL an object stored under `storage_key` is served from
    fn public_url(&self, storage_key: &str) -> String;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
