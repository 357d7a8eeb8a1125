//! Key generation shared by the upload pipeline and every backend.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

use crate::{StorageError, StorageResult};

/// Random bytes behind every generated asset name
pub const ASSET_NAME_BYTES: usize = 32;

/// Generate a collision-resistant file name: 32 random bytes, URL-safe base64, plus extension.
///
/// No existence check is made; 256 bits of randomness make collisions negligible.
pub fn random_asset_name(extension: &str) -> String {
    let bytes: [u8; ASSET_NAME_BYTES] = rand::random();
    let name = URL_SAFE_NO_PAD.encode(bytes);
    let extension = extension.trim_start_matches('.');
    if extension.is_empty() {
        name
    } else {
        format!("{}.{}", name, extension)
    }
}

/// Join a key prefix and a file name: `{prefix}/{name}`
pub fn prefixed_key(prefix: &str, name: &str) -> String {
    format!("{}/{}", prefix.trim_end_matches('/'), name)
}

/// Reject keys that could escape a backend's namespace
pub fn validate_key(storage_key: &str) -> StorageResult<()> {
    if storage_key.is_empty() {
        return Err(StorageError::InvalidKey("Storage key is empty".to_string()));
    }
    if storage_key.contains("..") || storage_key.starts_with('/') || storage_key.contains('\\')
    {
        return Err(StorageError::InvalidKey(
            "Storage key contains invalid characters".to_string(),
        ));
    }
    Ok(())
}
