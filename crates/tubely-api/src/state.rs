//! Application state and sub-state extractors.
//!
//! Handlers take `State<Arc<AppState>>`, or extract a sub-state via Axum's `FromRef` when that
//! is all they need.

use std::path::PathBuf;
use std::sync::Arc;

use tubely_core::{AssetKind, Config, UploadConfig};
use tubely_db::VideoRepository;
use tubely_processing::AspectRatioClassifier;

use crate::auth::JwtService;
use crate::services::upload::AssetPersister;

// ----- Sub-state types -----

/// Per-kind upload size bounds in bytes
#[derive(Debug, Clone, Copy)]
pub struct UploadLimits {
    pub max_thumbnail_bytes: usize,
    pub max_video_bytes: usize,
}

impl UploadLimits {
    pub fn for_kind(&self, kind: AssetKind) -> usize {
        match kind {
            AssetKind::Thumbnail => self.max_thumbnail_bytes,
            AssetKind::Video => self.max_video_bytes,
        }
    }

    pub fn largest(&self) -> usize {
        self.max_thumbnail_bytes.max(self.max_video_bytes)
    }
}

impl From<&UploadConfig> for UploadLimits {
    fn from(config: &UploadConfig) -> Self {
        Self {
            max_thumbnail_bytes: config.max_thumbnail_bytes,
            max_video_bytes: config.max_video_bytes,
        }
    }
}

/// Everything the upload pipeline needs besides the record store
#[derive(Clone)]
pub struct UploadState {
    pub persister: AssetPersister,
    pub classifier: AspectRatioClassifier,
    pub limits: UploadLimits,
    /// Directory video uploads are staged in before probing
    pub staging_dir: PathBuf,
}

// ----- Main application state -----

pub struct AppState {
    pub config: Config,
    pub videos: Arc<dyn VideoRepository>,
    pub auth: JwtService,
    pub uploads: UploadState,
}

impl AppState {
    pub fn new(
        config: Config,
        videos: Arc<dyn VideoRepository>,
        persister: AssetPersister,
        classifier: AspectRatioClassifier,
    ) -> Self {
        let auth = JwtService::new(config.jwt_secret());
        let uploads = UploadState {
            persister,
            classifier,
            limits: UploadLimits::from(&config.uploads),
            staging_dir: config.uploads.staging_dir.clone(),
        };

        Self {
            config,
            videos,
            auth,
            uploads,
        }
    }
}

// ----- FromRef for sub-state extraction -----

impl axum::extract::FromRef<Arc<AppState>> for JwtService {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.auth.clone()
    }
}

impl axum::extract::FromRef<Arc<AppState>> for UploadState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.uploads.clone()
    }
}
