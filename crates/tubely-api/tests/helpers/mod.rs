//! Test helpers: build AppState and router for integration tests.
//!
//! Every app gets its own temp assets and staging directories, an in-memory record store, a
//! fake probe and an S3 backend over `object_store::memory::InMemory`.

pub mod fixtures;
pub mod probe;
pub mod records;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::{TestResponse, TestServer};
use bytes::Bytes;
use futures::TryStreamExt;
use object_store::memory::InMemory;
use object_store::ObjectStore;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;
use tubely_api::constants;
use tubely_api::services::upload::AssetPersister;
use tubely_api::setup::routes;
use tubely_api::state::AppState;
use tubely_core::{BaseConfig, Config, StorageBackend, StorageConfig, UploadConfig, Video};
use tubely_db::{InMemoryVideoRepository, VideoRepository};
use tubely_processing::AspectRatioClassifier;
use tubely_storage::{LocalStorage, MemoryStorage, S3Storage, Storage};
use uuid::Uuid;

use probe::FakeProbe;
use records::FailingUpdates;

pub const TEST_JWT_SECRET: &str = "tubely-test-secret-tubely-test-secret";
pub const TEST_BUCKET: &str = "tubely-videos";
pub const TEST_REGION: &str = "us-east-2";
pub const TEST_BOUNDARY: &str = "tubely-test-boundary";

/// API path prefix for tests (e.g. `/api`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// One-part multipart form carrying `data` in `field`
pub fn file_form(field: &str, file_name: &str, mime_type: &str, data: Vec<u8>) -> MultipartForm {
    let part = Part::bytes(Bytes::from(data))
        .file_name(file_name)
        .mime_type(mime_type);
    MultipartForm::new().add_part(field, part)
}

/// Raw `multipart/form-data` body with a single file part, delimited by [`TEST_BOUNDARY`]
pub fn multipart_body(field: &str, file_name: &str, mime_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: {mime_type}\r\n\r\n",
        b = TEST_BOUNDARY,
    )
    .into_bytes();
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", TEST_BOUNDARY).as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", TEST_BOUNDARY)
}

pub fn video_path(video_id: impl std::fmt::Display) -> String {
    api_path(&format!("/videos/{}/video", video_id))
}

pub struct TestOptions {
    pub thumbnail_backend: StorageBackend,
    pub probe: FakeProbe,
    pub max_thumbnail_bytes: usize,
    pub max_video_bytes: usize,
    /// Make every record update fail after the asset is stored
    pub fail_updates: bool,
}

impl Default for TestOptions {
    fn default() -> Self {
        Self {
            thumbnail_backend: StorageBackend::Local,
            probe: FakeProbe::Dimensions(1920, 1080),
            max_thumbnail_bytes: 10 * 1024 * 1024,
            max_video_bytes: 10 * 1024 * 1024,
            fail_updates: false,
        }
    }
}

/// Test application: server, state, and owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub router: Router,
    pub state: Arc<AppState>,
    pub records: InMemoryVideoRepository,
    pub video_objects: Arc<InMemory>,
    pub assets_dir: TempDir,
    pub staging_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Insert a video record owned by `owner`
    pub async fn create_video(&self, owner: Uuid) -> Video {
        let video = Video::new(owner, "Boots", "A bear on a hike");
        self.records
            .create_video(&video)
            .await
            .expect("Failed to create video");
        video
    }

    pub async fn record(&self, id: Uuid) -> Video {
        self.records
            .get_video(id)
            .await
            .expect("Failed to read video")
            .expect("Video missing")
    }

    pub fn token_for(&self, user_id: Uuid) -> String {
        self.state
            .auth
            .issue(user_id, chrono::Duration::hours(1))
            .expect("Failed to issue token")
    }

    /// Files written below the assets root
    pub fn asset_files(&self) -> Vec<PathBuf> {
        fn walk(dir: &std::path::Path, out: &mut Vec<PathBuf>) {
            for entry in std::fs::read_dir(dir).expect("Failed to read dir") {
                let path = entry.expect("Failed to read entry").path();
                if path.is_dir() {
                    walk(&path, out);
                } else {
                    out.push(path);
                }
            }
        }
        let mut files = Vec::new();
        walk(self.assets_dir.path(), &mut files);
        files
    }

    pub fn staging_file_count(&self) -> usize {
        std::fs::read_dir(self.staging_dir.path())
            .expect("Failed to read staging dir")
            .count()
    }

    /// Keys present in the video bucket
    pub async fn video_keys(&self) -> Vec<String> {
        self.video_objects
            .list(None)
            .map_ok(|meta| meta.location.to_string())
            .try_collect()
            .await
            .expect("Failed to list objects")
    }

    /// PUT `data` as the `video` field with its `Content-Length` declared
    pub async fn put_video(&self, video_id: Uuid, token: &str, data: &[u8]) -> TestResponse {
        let body = multipart_body("video", "clip.mp4", "video/mp4", data);
        self.server
            .put(&video_path(video_id))
            .add_header("Authorization", bearer(token))
            .add_header("Content-Type", multipart_content_type())
            .add_header("Content-Length", body.len().to_string())
            .bytes(Bytes::from(body))
            .await
    }

    /// PUT `data` as the `video` field, streamed through the router in `chunk_size` pieces.
    ///
    /// `declared_length` is sent as `Content-Length` verbatim, so it may disagree with the
    /// body actually streamed.
    pub async fn put_video_streamed(
        &self,
        video_id: Uuid,
        token: &str,
        data: &[u8],
        chunk_size: usize,
        declared_length: Option<u64>,
    ) -> (StatusCode, serde_json::Value) {
        let body = multipart_body("video", "clip.mp4", "video/mp4", data);
        let chunks: Vec<Result<Bytes, std::io::Error>> = body
            .chunks(chunk_size)
            .map(|chunk| Ok(Bytes::copy_from_slice(chunk)))
            .collect();

        let mut request = Request::builder()
            .method(Method::PUT)
            .uri(video_path(video_id))
            .header(header::AUTHORIZATION, bearer(token))
            .header(header::CONTENT_TYPE, multipart_content_type());
        if let Some(len) = declared_length {
            request = request.header(header::CONTENT_LENGTH, len);
        }
        let request = request
            .body(Body::from_stream(futures::stream::iter(chunks)))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    pub fn video_url_prefix(&self) -> String {
        format!("https://{}.s3.{}.amazonaws.com/", TEST_BUCKET, TEST_REGION)
    }
}

pub fn create_test_config(assets_dir: &TempDir, staging_dir: &TempDir, options: &TestOptions) -> Config {
    Config {
        base: BaseConfig {
            server_port: 8091,
            public_host: "localhost".to_string(),
            cors_origins: vec!["*".to_string()],
            jwt_secret: TEST_JWT_SECRET.to_string(),
            environment: "test".to_string(),
            database_url: None,
        },
        storage: StorageConfig {
            thumbnail_backend: options.thumbnail_backend,
            video_backend: StorageBackend::S3,
            assets_root: assets_dir.path().to_path_buf(),
            s3_bucket: Some(TEST_BUCKET.to_string()),
            s3_region: Some(TEST_REGION.to_string()),
            s3_endpoint: None,
        },
        uploads: UploadConfig {
            max_thumbnail_bytes: options.max_thumbnail_bytes,
            max_video_bytes: options.max_video_bytes,
            ffprobe_path: "ffprobe".to_string(),
            staging_dir: staging_dir.path().to_path_buf(),
        },
    }
}

/// Setup test app with local thumbnails and a prober reporting 1920x1080.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(TestOptions::default()).await
}

pub async fn setup_test_app_with(options: TestOptions) -> TestApp {
    let assets_dir = tempfile::tempdir().expect("Failed to create assets directory");
    let staging_dir = tempfile::tempdir().expect("Failed to create staging directory");
    let config = create_test_config(&assets_dir, &staging_dir, &options);

    let thumbnails: Arc<dyn Storage> = match options.thumbnail_backend {
        StorageBackend::Memory => Arc::new(MemoryStorage::new(config.memory_thumbnails_base_url())),
        _ => Arc::new(
            LocalStorage::new(assets_dir.path(), config.assets_base_url())
                .await
                .expect("Failed to create local storage"),
        ),
    };

    let video_objects = Arc::new(InMemory::new());
    let videos: Arc<dyn Storage> = Arc::new(S3Storage::with_store(
        video_objects.clone() as Arc<dyn ObjectStore>,
        TEST_BUCKET.to_string(),
        TEST_REGION.to_string(),
        None,
    ));

    let records = InMemoryVideoRepository::new();
    let repository: Arc<dyn VideoRepository> = if options.fail_updates {
        Arc::new(FailingUpdates(records.clone()))
    } else {
        Arc::new(records.clone())
    };

    let classifier = AspectRatioClassifier::new(Arc::new(options.probe));
    let state = Arc::new(AppState::new(
        config.clone(),
        repository,
        AssetPersister::new(thumbnails, videos),
        classifier,
    ));

    let router = routes::setup_routes(&config, state.clone()).expect("Failed to build routes");
    let server = TestServer::new(router.clone()).expect("Failed to create test server");

    TestApp {
        server,
        router,
        state,
        records,
        video_objects,
        assets_dir,
        staging_dir,
    }
}
