//! Tubely Storage Library
//!
//! Storage abstraction and backends for uploaded assets: the local assets directory, a
//! process-wide in-memory store and S3-compatible object storage.
//!
//! # Storage key format
//!
//! - **Thumbnails on disk**: `{name}.{ext}` directly under the assets root
//! - **Thumbnails in memory**: the owning video's ID
//! - **Videos**: `{aspect}/{name}.{ext}` where `aspect` is `wide`, `tall` or `other`
//!
//! `{name}` is 32 random bytes, URL-safe base64 without padding (see [`keys`]). Keys must
//! not contain `..` or a leading `/`.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
pub mod memory;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::{create_thumbnail_storage, create_video_storage};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use memory::MemoryStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult, StoredObject};
pub use tubely_core::StorageBackend;
