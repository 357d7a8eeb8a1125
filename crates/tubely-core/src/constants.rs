//! Shared constants

/// Bytes in one mebibyte
pub const MIB: usize = 1024 * 1024;

/// Default serving port
pub const DEFAULT_PORT: u16 = 8091;

/// Default thumbnail upload bound, in MiB
pub const DEFAULT_MAX_THUMBNAIL_SIZE_MB: usize = 10;

/// Default video upload bound, in MiB (1 GiB)
pub const DEFAULT_MAX_VIDEO_SIZE_MB: usize = 1024;

/// Largest accepted value for either upload bound, in MiB (64 GiB)
pub const MAX_UPLOAD_SIZE_MB: usize = 64 * 1024;

/// Issuer written into and required from access tokens
pub const JWT_ISSUER: &str = "tubely-access";

/// Minimum accepted length for `JWT_SECRET`
pub const MIN_JWT_SECRET_LEN: usize = 32;
