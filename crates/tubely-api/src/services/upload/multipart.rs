//! Multipart helpers

use axum::extract::multipart::Field;
use axum::extract::Multipart;
use axum::http::{header, HeaderMap};
use bytes::Bytes;
use tubely_core::{AppError, AssetKind};
use tubely_processing::SNIFF_PREFIX_LEN;

use crate::error::HttpAppError;

/// `Content-Length` of the request, when declared and well-formed
pub fn declared_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
}

/// Reject a request whose declared body already exceeds `max_bytes`
///
/// The bound applies to the whole request body, multipart framing included.
pub fn check_declared_length(declared: Option<u64>, max_bytes: usize) -> Result<(), AppError> {
    match declared {
        Some(len) if len > max_bytes as u64 => Err(too_large(max_bytes)),
        _ => Ok(()),
    }
}

/// Like [`check_declared_length`], but a body of unknown length is refused outright
pub fn require_declared_length(declared: Option<u64>, max_bytes: usize) -> Result<u64, AppError> {
    let len = declared.ok_or_else(|| {
        AppError::LengthRequired("Content-Length must be declared for this upload".to_string())
    })?;
    check_declared_length(Some(len), max_bytes)?;
    Ok(len)
}

pub(super) fn too_large(max_bytes: usize) -> AppError {
    AppError::PayloadTooLarge(format!(
        "File exceeds the maximum size of {} bytes",
        max_bytes
    ))
}

pub(super) fn missing_field(kind: AssetKind) -> AppError {
    AppError::MalformedUpload(format!("Missing '{}' file field", kind.form_field()))
}

/// Buffer the whole `kind` field, failing once it grows past `max_bytes`
pub(super) async fn read_file_field(
    multipart: &mut Multipart,
    kind: AssetKind,
    max_bytes: usize,
) -> Result<Bytes, HttpAppError> {
    while let Some(mut field) = multipart.next_field().await? {
        if field.name() != Some(kind.form_field()) {
            continue;
        }

        let mut data = Vec::new();
        while let Some(chunk) = field.chunk().await? {
            if data.len() + chunk.len() > max_bytes {
                return Err(too_large(max_bytes).into());
            }
            data.extend_from_slice(&chunk);
        }
        return Ok(Bytes::from(data));
    }

    Err(missing_field(kind).into())
}

/// Pull up to [`SNIFF_PREFIX_LEN`] leading bytes of a field
///
/// The returned buffer may run past the prefix length when a chunk straddles it; every byte
/// read is kept so nothing has to be pushed back.
pub(super) async fn read_prefix(
    field: &mut Field<'_>,
    max_bytes: usize,
) -> Result<Vec<u8>, HttpAppError> {
    let mut prefix = Vec::with_capacity(SNIFF_PREFIX_LEN);
    while prefix.len() < SNIFF_PREFIX_LEN {
        match field.chunk().await? {
            Some(chunk) => {
                if prefix.len() + chunk.len() > max_bytes {
                    return Err(too_large(max_bytes).into());
                }
                prefix.extend_from_slice(&chunk);
            }
            None => break,
        }
    }
    Ok(prefix)
}
