//! Upload orchestration
//!
//! Both flows share the same skeleton: the record is loaded and ownership checked before a
//! single body byte is read, and the record is only touched once the asset is stored.

use std::sync::Arc;

use axum::extract::multipart::MultipartRejection;
use axum::extract::Multipart;
use tubely_core::{AppError, AssetKind, Video};
use tubely_processing::validate_upload;
use uuid::Uuid;

use crate::error::HttpAppError;
use crate::state::AppState;

use super::multipart::{
    check_declared_length, missing_field, read_file_field, read_prefix, require_declared_length,
    too_large,
};
use super::staging::StagingFile;
use super::types::StoredAsset;

pub struct UploadService {
    state: Arc<AppState>,
}

impl UploadService {
    pub fn new(state: &Arc<AppState>) -> Self {
        Self {
            state: state.clone(),
        }
    }

    /// Attach a PNG or JPEG thumbnail to a video the caller owns
    #[tracing::instrument(skip(self, multipart), fields(kind = "thumbnail"))]
    pub async fn upload_thumbnail(
        &self,
        user_id: Uuid,
        video_id: Uuid,
        declared_length: Option<u64>,
        multipart: Result<Multipart, MultipartRejection>,
    ) -> Result<Video, HttpAppError> {
        let kind = AssetKind::Thumbnail;

        // 1. Load the record and check ownership
        let video = self.authorize(user_id, video_id).await?;

        // 2. Bound and read the file part
        let max_bytes = self.state.uploads.limits.for_kind(kind);
        check_declared_length(declared_length, max_bytes)?;
        let mut multipart = multipart?;
        let data = read_file_field(&mut multipart, kind, max_bytes).await?;

        // 3. Decide the type from content
        let sniffed = validate_upload(kind, &data)?;

        // 4. Persist
        let asset = self
            .state
            .uploads
            .persister
            .store_thumbnail(video_id, sniffed, data)
            .await?;

        // 5. Point the record at the new asset
        self.commit(video, asset).await
    }

    /// Attach an MP4 video to a video record the caller owns.
    ///
    /// The body is staged on disk, probed for its aspect ratio and streamed to storage under
    /// the matching prefix. The staging file is gone once this returns, whatever the outcome.
    #[tracing::instrument(skip(self, multipart), fields(kind = "video"))]
    pub async fn upload_video(
        &self,
        user_id: Uuid,
        video_id: Uuid,
        declared_length: Option<u64>,
        multipart: Result<Multipart, MultipartRejection>,
    ) -> Result<Video, HttpAppError> {
        let kind = AssetKind::Video;
        let uploads = &self.state.uploads;

        // 1. Load the record and check ownership
        let video = self.authorize(user_id, video_id).await?;

        // 2. Bound the body. Its length must be known up front so an oversize upload is
        // turned away before anything is staged.
        let max_bytes = uploads.limits.for_kind(kind);
        require_declared_length(declared_length, max_bytes)?;
        let mut multipart = multipart?;

        // 3. Sniff the leading bytes, then stage the rest
        let mut staged = None;
        while let Some(mut field) = multipart.next_field().await? {
            if field.name() != Some(kind.form_field()) {
                continue;
            }

            let prefix = read_prefix(&mut field, max_bytes).await?;
            let sniffed = validate_upload(kind, &prefix)?;

            let mut staging = StagingFile::create(&uploads.staging_dir, sniffed.extension)
                .map_err(|e| AppError::Internal(format!("Failed to create staging file: {}", e)))?;
            staging.write_all(&prefix).await.map_err(staging_write_error)?;

            while let Some(chunk) = field.chunk().await? {
                if staging.size() + chunk.len() as u64 > max_bytes as u64 {
                    return Err(too_large(max_bytes).into());
                }
                staging.write_all(&chunk).await.map_err(staging_write_error)?;
            }
            staging.finish().await.map_err(staging_write_error)?;

            staged = Some((staging, sniffed));
            break;
        }
        let (staging, sniffed) = staged.ok_or_else(|| missing_field(kind))?;

        tracing::debug!(
            path = %staging.path().display(),
            size_bytes = staging.size(),
            "Video staged"
        );

        // 4. Classify by aspect ratio
        let aspect = uploads.classifier.classify(staging.path()).await?;

        // 5. Persist under the aspect prefix
        let asset = uploads
            .persister
            .store_video(&staging, sniffed, aspect)
            .await?;
        drop(staging);

        // 6. Point the record at the new asset
        self.commit(video, asset).await
    }

    async fn authorize(&self, user_id: Uuid, video_id: Uuid) -> Result<Video, HttpAppError> {
        let video = self
            .state
            .videos
            .get_video(video_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Couldn't find video".to_string()))?;

        if !video.is_owned_by(user_id) {
            return Err(AppError::Forbidden("You do not own this video".to_string()).into());
        }

        Ok(video)
    }

    async fn commit(&self, mut video: Video, asset: StoredAsset) -> Result<Video, HttpAppError> {
        video.set_asset_url(asset.kind, asset.storage_url.clone());

        if let Err(e) = self.state.videos.update_video(&video).await {
            // The asset stays in storage with nothing pointing at it
            tracing::error!(
                error = %e,
                video_id = %video.id,
                kind = %asset.kind,
                storage_key = %asset.storage_key,
                storage_url = %asset.storage_url,
                "Orphaned asset: video record update failed after store"
            );
            return Err(AppError::RecordUpdate(e.to_string()).into());
        }

        tracing::info!(
            video_id = %video.id,
            kind = %asset.kind,
            storage_key = %asset.storage_key,
            content_type = asset.content_type,
            size_bytes = asset.file_size,
            "Upload completed"
        );

        Ok(video)
    }
}

fn staging_write_error(e: std::io::Error) -> AppError {
    AppError::Internal(format!("Failed to write staging file: {}", e))
}
