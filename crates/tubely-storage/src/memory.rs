use crate::keys::validate_key;
use crate::traits::{Storage, StorageError, StorageResult, StoredObject};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Process-wide in-memory store
///
/// Contents live as long as the process and are lost on restart. Clones share the same map,
/// so one instance can be handed to both the upload pipeline and the route serving it.
#[derive(Clone)]
pub struct MemoryStorage {
    objects: Arc<RwLock<HashMap<String, StoredObject>>>,
    base_url: String,
}

impl MemoryStorage {
    pub fn new(base_url: String) -> Self {
        Self {
            objects: Arc::new(RwLock::new(HashMap::new())),
            base_url,
        }
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn upload_with_key(
        &self,
        storage_key: &str,
        data: Bytes,
        content_type: &str,
    ) -> StorageResult<String> {
        validate_key(storage_key)?;
        let size = data.len();

        let replaced = self
            .objects
            .write()
            .await
            .insert(
                storage_key.to_string(),
                StoredObject {
                    data,
                    content_type: Some(content_type.to_string()),
                },
            )
            .is_some();

        tracing::debug!(
            key = %storage_key,
            size_bytes = size,
            replaced,
            "Memory storage upload successful"
        );

        Ok(self.public_url(storage_key))
    }

    async fn download(&self, storage_key: &str) -> StorageResult<StoredObject> {
        validate_key(storage_key)?;
        self.objects
            .read()
            .await
            .get(storage_key)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(storage_key.to_string()))
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        validate_key(storage_key)?;
        Ok(self.objects.read().await.contains_key(storage_key))
    }

    fn public_url(&self, storage_key: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), storage_key)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}
