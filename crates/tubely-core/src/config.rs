//! Configuration module
//!
//! Configuration is read once at startup from the process environment (after loading a `.env`
//! file when present) and shared read-only afterwards.

use std::env;
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_MAX_THUMBNAIL_SIZE_MB, DEFAULT_MAX_VIDEO_SIZE_MB, DEFAULT_PORT, MAX_UPLOAD_SIZE_MB,
    MIB, MIN_JWT_SECRET_LEN,
};
use crate::storage_types::StorageBackend;

/// Server-level settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    /// Host written into locally served asset URLs
    pub public_host: String,
    pub cors_origins: Vec<String>,
    pub jwt_secret: String,
    pub environment: String,
    /// Postgres connection string; the in-memory repository is used when unset
    pub database_url: Option<String>,
}

/// Where thumbnails and videos are persisted
#[derive(Clone, Debug)]
pub struct StorageConfig {
    pub thumbnail_backend: StorageBackend,
    pub video_backend: StorageBackend,
    pub assets_root: PathBuf,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    // Custom endpoint for S3-compatible providers (MinIO, LocalStack, ...)
    pub s3_endpoint: Option<String>,
}

/// Upload pipeline limits and tools
#[derive(Clone, Debug)]
pub struct UploadConfig {
    pub max_thumbnail_bytes: usize,
    pub max_video_bytes: usize,
    pub ffprobe_path: String,
    pub staging_dir: PathBuf,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub base: BaseConfig,
    pub storage: StorageConfig,
    pub uploads: UploadConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let server_port = env::var("PORT")
            .ok()
            .map(|p| p.parse::<u16>())
            .transpose()
            .map_err(|e| anyhow::anyhow!("PORT must be a valid port number: {}", e))?
            .unwrap_or(DEFAULT_PORT);

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable must be set"))?;

        let base = BaseConfig {
            server_port,
            public_host: env::var("PUBLIC_HOST").unwrap_or_else(|_| "localhost".to_string()),
            cors_origins,
            jwt_secret,
            environment,
            database_url: non_empty_var("DATABASE_URL"),
        };

        let storage = StorageConfig {
            thumbnail_backend: env::var("THUMBNAIL_STORAGE")
                .unwrap_or_else(|_| "local".to_string())
                .parse()?,
            video_backend: env::var("VIDEO_STORAGE")
                .unwrap_or_else(|_| "s3".to_string())
                .parse()?,
            assets_root: PathBuf::from(
                env::var("ASSETS_ROOT").unwrap_or_else(|_| "./assets".to_string()),
            ),
            s3_bucket: non_empty_var("S3_BUCKET"),
            s3_region: non_empty_var("S3_REGION").or_else(|| non_empty_var("AWS_REGION")),
            s3_endpoint: non_empty_var("S3_ENDPOINT"),
        };

        let uploads = UploadConfig {
            max_thumbnail_bytes: size_mb_var(
                "MAX_THUMBNAIL_SIZE_MB",
                DEFAULT_MAX_THUMBNAIL_SIZE_MB,
            )?,
            max_video_bytes: size_mb_var("MAX_VIDEO_SIZE_MB", DEFAULT_MAX_VIDEO_SIZE_MB)?,
            ffprobe_path: env::var("FFPROBE_PATH").unwrap_or_else(|_| "ffprobe".to_string()),
            staging_dir: non_empty_var("STAGING_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(env::temp_dir),
        };

        Ok(Config {
            base,
            storage,
            uploads,
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.base.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(anyhow::anyhow!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LEN
            ));
        }

        if self.is_production() && self.base.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        if let Some(url) = &self.base.database_url {
            if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
                return Err(anyhow::anyhow!(
                    "DATABASE_URL must be a valid PostgreSQL connection string"
                ));
            }
        }

        match self.storage.thumbnail_backend {
            StorageBackend::Local | StorageBackend::Memory => {}
            StorageBackend::S3 => {
                return Err(anyhow::anyhow!(
                    "THUMBNAIL_STORAGE must be 'local' or 'memory'"
                ));
            }
        }

        match self.storage.video_backend {
            StorageBackend::S3 => {
                if self.storage.s3_bucket.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_BUCKET must be set when using S3 video storage"
                    ));
                }
                if self.storage.s3_region.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_REGION or AWS_REGION must be set when using S3 video storage"
                    ));
                }
            }
            StorageBackend::Local => {}
            StorageBackend::Memory => {
                return Err(anyhow::anyhow!("VIDEO_STORAGE must be 's3' or 'local'"));
            }
        }

        if self.uploads.max_thumbnail_bytes == 0 || self.uploads.max_video_bytes == 0 {
            return Err(anyhow::anyhow!("Upload size limits must be greater than zero"));
        }

        let ceiling = MAX_UPLOAD_SIZE_MB.saturating_mul(MIB);
        if self.uploads.max_thumbnail_bytes > ceiling || self.uploads.max_video_bytes > ceiling {
            return Err(anyhow::anyhow!(
                "Upload size limits must be at most {} MiB",
                MAX_UPLOAD_SIZE_MB
            ));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.base.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn server_port(&self) -> u16 {
        self.base.server_port
    }

    pub fn jwt_secret(&self) -> &str {
        &self.base.jwt_secret
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.base.cors_origins
    }

    pub fn database_url(&self) -> Option<&str> {
        self.base.database_url.as_deref()
    }

    /// `http://<host>:<port>`
    pub fn public_base_url(&self) -> String {
        format!("http://{}:{}", self.base.public_host, self.base.server_port)
    }

    /// Base URL of files served from the assets root
    pub fn assets_base_url(&self) -> String {
        format!("{}/assets", self.public_base_url())
    }

    /// Base URL of thumbnails held in the in-memory store
    pub fn memory_thumbnails_base_url(&self) -> String {
        format!("{}/api/thumbnails", self.public_base_url())
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Read a size in MiB and return it in bytes
fn size_mb_var(key: &str, default: usize) -> Result<usize, anyhow::Error> {
    let mb = env::var(key)
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default);
    mb_to_bytes(key, mb)
}

fn mb_to_bytes(key: &str, mb: usize) -> Result<usize, anyhow::Error> {
    if mb > MAX_UPLOAD_SIZE_MB {
        return Err(anyhow::anyhow!(
            "{} must be at most {} MiB",
            key,
            MAX_UPLOAD_SIZE_MB
        ));
    }
    mb.checked_mul(MIB)
        .ok_or_else(|| anyhow::anyhow!("{} is too large", key))
}
