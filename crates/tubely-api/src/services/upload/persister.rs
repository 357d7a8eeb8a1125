//! Asset persistence: key selection and writes to the configured backends

use std::sync::Arc;

use bytes::Bytes;
use tubely_core::{AspectRatio, AssetKind};
use tubely_processing::SniffedType;
use tubely_storage::keys::{prefixed_key, random_asset_name};
use tubely_storage::{Storage, StorageBackend, StorageResult};
use uuid::Uuid;

use super::staging::StagingFile;
use super::types::StoredAsset;

/// Writes accepted uploads to the thumbnail and video stores
#[derive(Clone)]
pub struct AssetPersister {
    thumbnails: Arc<dyn Storage>,
    videos: Arc<dyn Storage>,
}

impl AssetPersister {
    pub fn new(thumbnails: Arc<dyn Storage>, videos: Arc<dyn Storage>) -> Self {
        Self { thumbnails, videos }
    }

    pub fn thumbnails(&self) -> &Arc<dyn Storage> {
        &self.thumbnails
    }

    pub fn videos(&self) -> &Arc<dyn Storage> {
        &self.videos
    }

    /// Key a thumbnail is stored under.
    ///
    /// The in-memory store is addressed by video ID, so a new upload replaces the previous
    /// thumbnail. Files on disk get a fresh random name each time.
    fn thumbnail_key(&self, video_id: Uuid, sniffed: SniffedType) -> String {
        match self.thumbnails.backend_type() {
            StorageBackend::Memory => video_id.to_string(),
            _ => random_asset_name(sniffed.extension),
        }
    }

    pub async fn store_thumbnail(
        &self,
        video_id: Uuid,
        sniffed: SniffedType,
        data: Bytes,
    ) -> StorageResult<StoredAsset> {
        let storage_key = self.thumbnail_key(video_id, sniffed);
        let file_size = data.len() as u64;

        let storage_url = self
            .thumbnails
            .upload_with_key(&storage_key, data, sniffed.mime_type)
            .await?;

        Ok(StoredAsset {
            kind: AssetKind::Thumbnail,
            storage_key,
            storage_url,
            content_type: sniffed.mime_type,
            file_size,
        })
    }

    /// Store a staged video under `{aspect}/{random}.{ext}`
    pub async fn store_video(
        &self,
        staged: &StagingFile,
        sniffed: SniffedType,
        aspect: AspectRatio,
    ) -> StorageResult<StoredAsset> {
        let storage_key = prefixed_key(aspect.key_prefix(), &random_asset_name(sniffed.extension));

        let storage_url = self
            .videos
            .upload_file(&storage_key, staged.path(), sniffed.mime_type)
            .await?;

        Ok(StoredAsset {
            kind: AssetKind::Video,
            storage_key,
            storage_url,
            content_type: sniffed.mime_type,
            file_size: staged.size(),
        })
    }
}
