//! Types used by the upload service

use tubely_core::AssetKind;

/// Where a persisted asset ended up
#[derive(Debug, Clone)]
pub struct StoredAsset {
    pub kind: AssetKind,
    pub storage_key: String,
    pub storage_url: String,
    pub content_type: &'static str,
    pub file_size: u64,
}
