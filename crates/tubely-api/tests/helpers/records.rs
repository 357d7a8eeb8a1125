//! Record store doubles

use async_trait::async_trait;
use tubely_core::{AppError, Video};
use tubely_db::{InMemoryVideoRepository, VideoRepository};
use uuid::Uuid;

/// Reads go through; every update fails
pub struct FailingUpdates(pub InMemoryVideoRepository);

#[async_trait]
impl VideoRepository for FailingUpdates {
    async fn create_video(&self, video: &Video) -> Result<(), AppError> {
        self.0.create_video(video).await
    }

    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        self.0.get_video(id).await
    }

    async fn update_video(&self, _video: &Video) -> Result<(), AppError> {
        Err(AppError::Internal("connection reset by peer".to_string()))
    }
}
