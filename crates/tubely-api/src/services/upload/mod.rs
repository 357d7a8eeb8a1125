//! Thumbnail and video upload pipeline
//!
//! authorize → bound → read → sniff → (stage → classify) → persist → update record

mod multipart;
mod persister;
mod service;
mod staging;
mod types;

pub use multipart::{check_declared_length, declared_length, require_declared_length};
pub use persister::AssetPersister;
pub use service::UploadService;
pub use staging::StagingFile;
pub use types::StoredAsset;
