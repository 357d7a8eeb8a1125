//! Upload content validation
//!
//! The media type of an upload is decided from its leading bytes only. Whatever the client
//! declares in the multipart part's `Content-Type` is never consulted.

use tubely_core::AssetKind;

/// Bytes of an upload inspected for its signature
pub const SNIFF_PREFIX_LEN: usize = 8 * 1024;

/// Media type detected from content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SniffedType {
    pub mime_type: &'static str,
    /// Canonical extension without the leading dot (`png`, `jpg`, `mp4`)
    pub extension: &'static str,
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Empty file")]
    EmptyFile,

    #[error("Unrecognized {kind} content")]
    Unrecognized { kind: AssetKind },

    #[error("Unsupported {kind} type: {detected} (allowed: {allowed:?})")]
    UnsupportedType {
        kind: AssetKind,
        detected: String,
        allowed: Vec<String>,
    },
}

/// Detect the media type of `prefix` from its magic bytes
pub fn sniff(prefix: &[u8]) -> Option<SniffedType> {
    infer::get(prefix).map(|kind| SniffedType {
        mime_type: kind.mime_type(),
        extension: kind.extension(),
    })
}

/// Sniff `prefix` and check the result against the allow-list of `kind`
pub fn validate_upload(kind: AssetKind, prefix: &[u8]) -> Result<SniffedType, ValidationError> {
    if prefix.is_empty() {
        return Err(ValidationError::EmptyFile);
    }

    let Some(sniffed) = sniff(prefix) else {
        tracing::debug!(
            kind = %kind,
            size = prefix.len(),
            "Upload does not match any known magic byte signature"
        );
        return Err(ValidationError::Unrecognized { kind });
    };

    if !kind.accepts(sniffed.mime_type) {
        return Err(ValidationError::UnsupportedType {
            kind,
            detected: sniffed.mime_type.to_string(),
            allowed: kind
                .allowed_content_types()
                .iter()
                .map(|t| t.to_string())
                .collect(),
        });
    }

    Ok(sniffed)
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_png_thumbnail_accepted() {
        let sniffed = validate_upload(AssetKind::Thumbnail, PNG).unwrap();
        assert_eq!(sniffed.mime_type, "image/png");
        assert_eq!(sniffed.extension, "png");
    }

    #[test]
    fn test_jpeg_thumbnail_accepted() {
        let sniffed = validate_upload(AssetKind::Thumbnail, JPEG).unwrap();
        assert_eq!(sniffed.mime_type, "image/jpeg");
        assert_eq!(sniffed.extension, "jpg");
    }

    #[test]
    fn test_gif_thumbnail_rejected() {
        let err = validate_upload(AssetKind::Thumbnail, GIF).unwrap_err();
        match err {
            ValidationError::UnsupportedType {
                detected, allowed, ..
            } => {
                assert_eq!(detected, "image/gif");
                assert!(allowed.contains(&"image/png".to_string()));
            }
            other => panic!("Expected UnsupportedType, got {:?}", other),
        }
    }

    #[test]
    fn test_mp4_accepted_only_as_video() {
        let sniffed = validate_upload(AssetKind::Video, MP4).unwrap();
        assert_eq!(sniffed.mime_type, "video/mp4");
        assert_eq!(sniffed.extension, "mp4");

        assert!(matches!(
            validate_upload(AssetKind::Thumbnail, MP4),
            Err(ValidationError::UnsupportedType { .. })
        ));
    }

    #[test]
    fn test_image_rejected_as_video() {
        assert!(matches!(
            validate_upload(AssetKind::Video, PNG),
            Err(ValidationError::UnsupportedType { .. })
        ));
    }

    #[test]
    fn test_unrecognized_and_empty() {
        assert!(matches!(
            validate_upload(AssetKind::Thumbnail, b"just some plain text"),
            Err(ValidationError::Unrecognized { .. })
        ));
        assert!(matches!(
            validate_upload(AssetKind::Video, b""),
            Err(ValidationError::EmptyFile)
        ));
    }
}
