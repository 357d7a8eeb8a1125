use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tubely_core::{AppError, Video};
use uuid::Uuid;

use super::VideoRepository;

/// In-process video store, lost on restart
#[derive(Clone, Default)]
pub struct InMemoryVideoRepository {
    videos: Arc<RwLock<HashMap<Uuid, Video>>>,
}

impl InMemoryVideoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VideoRepository for InMemoryVideoRepository {
    async fn create_video(&self, video: &Video) -> Result<(), AppError> {
        self.videos.write().await.insert(video.id, video.clone());
        Ok(())
    }

    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        Ok(self.videos.read().await.get(&id).cloned())
    }

    async fn update_video(&self, video: &Video) -> Result<(), AppError> {
        match self.videos.write().await.get_mut(&video.id) {
            Some(existing) => {
                *existing = video.clone();
                Ok(())
            }
            None => Err(AppError::NotFound(format!("Video {} not found", video.id))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tubely_core::AssetKind;

    #[tokio::test]
    async fn test_create_get_update() {
        let repo = InMemoryVideoRepository::new();
        let mut video = Video::new(Uuid::new_v4(), "Boots", "A bear");
        repo.create_video(&video).await.unwrap();

        video.set_asset_url(AssetKind::Video, "https://b.s3.r.amazonaws.com/wide/x.mp4".into());
        repo.update_video(&video).await.unwrap();

        let stored = repo.get_video(video.id).await.unwrap().unwrap();
        assert_eq!(stored.video_url, video.video_url);
    }

    #[tokio::test]
    async fn test_missing_record() {
        let repo = InMemoryVideoRepository::new();
        assert!(repo.get_video(Uuid::new_v4()).await.unwrap().is_none());

        let video = Video::new(Uuid::new_v4(), "t", "d");
        assert!(matches!(
            repo.update_video(&video).await,
            Err(AppError::NotFound(_))
        ));
    }
}
