mod memory;
mod postgres;

pub use memory::InMemoryVideoRepository;
pub use postgres::PgVideoRepository;

use async_trait::async_trait;
use tubely_core::{AppError, Video};
use uuid::Uuid;

/// Video record store
#[async_trait]
pub trait VideoRepository: Send + Sync {
    async fn create_video(&self, video: &Video) -> Result<(), AppError>;

    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError>;

    /// Write back every mutable field of `video`. Fails with `NotFound` if the record is gone.
    async fn update_video(&self, video: &Video) -> Result<(), AppError>;
}
