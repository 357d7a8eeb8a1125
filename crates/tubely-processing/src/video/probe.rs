//! Media probe capability and its ffprobe implementation

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use tokio::process::Command;

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("Failed to run ffprobe: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("ffprobe exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    #[error("Failed to parse ffprobe output: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Probe reported no streams")]
    NoStreams,

    #[error("First stream has no usable dimensions (width: {width:?}, height: {height:?})")]
    MissingDimensions {
        width: Option<u32>,
        height: Option<u32>,
    },
}

/// Structured report of the streams in a media file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProbeReport {
    #[serde(default)]
    pub streams: Vec<ProbeStream>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProbeStream {
    pub codec_type: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl ProbeReport {
    pub fn from_json(data: &[u8]) -> Result<Self, ProbeError> {
        Ok(serde_json::from_slice(data)?)
    }
}

/// Reads stream information from a local media file
#[async_trait]
pub trait MediaProbe: Send + Sync {
    async fn probe(&self, path: &Path) -> Result<ProbeReport, ProbeError>;
}

/// Reject paths carrying shell metacharacters or traversal sequences
fn validate_path(path: &str) -> Result<()> {
    let dangerous_chars = [';', '|', '&', '$', '`', '(', ')', '<', '>', '\n', '\r'];
    if path.chars().any(|c| dangerous_chars.contains(&c)) {
        return Err(anyhow!("Path contains dangerous characters: {}", path));
    }

    if path.contains("..") {
        return Err(anyhow!("Path contains directory traversal: {}", path));
    }

    Ok(())
}

/// Probe backed by the `ffprobe` binary
#[derive(Debug, Clone)]
pub struct FfprobeProbe {
    ffprobe_path: String,
}

impl FfprobeProbe {
    pub fn new(ffprobe_path: impl Into<String>) -> Result<Self> {
        let ffprobe_path = ffprobe_path.into();
        validate_path(&ffprobe_path)
            .context("Invalid ffprobe_path: contains dangerous characters")?;

        if !ffprobe_path.chars().all(|c| {
            c.is_alphanumeric() || c == '/' || c == '-' || c == '_' || c == '.' || c == '\\'
        }) {
            return Err(anyhow!("Invalid ffprobe_path: contains unsafe characters"));
        }

        Ok(Self { ffprobe_path })
    }
}

#[async_trait]
impl MediaProbe for FfprobeProbe {
    #[tracing::instrument(skip(self), fields(
        process.executable.path = %self.ffprobe_path,
        ffprobe.operation = "probe"
    ))]
    async fn probe(&self, path: &Path) -> Result<ProbeReport, ProbeError> {
        let start = std::time::Instant::now();

        let output = Command::new(&self.ffprobe_path)
            .args(["-v", "error", "-print_format", "json", "-show_streams"])
            .arg(path)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(ProbeError::Spawn)?;

        if !output.status.success() {
            return Err(ProbeError::Failed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let report = ProbeReport::from_json(&output.stdout)?;

        tracing::debug!(
            duration_ms = start.elapsed().as_millis(),
            streams = report.streams.len(),
            "Video probe completed"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ffprobe_output() {
        let json = br#"{
            "streams": [
                {"index": 0, "codec_name": "h264", "codec_type": "video", "width": 1920, "height": 1080},
                {"index": 1, "codec_name": "aac", "codec_type": "audio", "sample_rate": "48000"}
            ]
        }"#;

        let report = ProbeReport::from_json(json).unwrap();
        assert_eq!(report.streams.len(), 2);
        assert_eq!(report.streams[0].width, Some(1920));
        assert_eq!(report.streams[0].height, Some(1080));
        assert_eq!(report.streams[1].codec_type.as_deref(), Some("audio"));
        assert_eq!(report.streams[1].width, None);
    }

    #[test]
    fn test_parse_output_without_streams() {
        let report = ProbeReport::from_json(b"{}").unwrap();
        assert!(report.streams.is_empty());
    }

    #[test]
    fn test_parse_garbage_fails() {
        assert!(matches!(
            ProbeReport::from_json(b"not json"),
            Err(ProbeError::Parse(_))
        ));
    }

    #[test]
    fn test_ffprobe_path_validation() {
        assert!(FfprobeProbe::new("ffprobe").is_ok());
        assert!(FfprobeProbe::new("/usr/local/bin/ffprobe").is_ok());
        assert!(FfprobeProbe::new("ffprobe; rm -rf /").is_err());
        assert!(FfprobeProbe::new("../bin/ffprobe").is_err());
        assert!(FfprobeProbe::new("ffprobe --help").is_err());
    }

    #[tokio::test]
    async fn test_missing_binary_is_spawn_error() {
        let probe = FfprobeProbe::new("/nonexistent/tubely/ffprobe").unwrap();
        let result = probe.probe(Path::new("/tmp/clip.mp4")).await;
        assert!(matches!(result, Err(ProbeError::Spawn(_))));
    }
}
