//! Stand-in for ffprobe

use async_trait::async_trait;
use std::path::Path;
use tubely_processing::{MediaProbe, ProbeError, ProbeReport, ProbeStream};

#[derive(Debug, Clone, Copy)]
pub enum FakeProbe {
    /// Report a single video stream with these dimensions
    Dimensions(u32, u32),
    /// Fail as ffprobe does on a file it cannot parse
    Failing,
}

#[async_trait]
impl MediaProbe for FakeProbe {
    async fn probe(&self, path: &Path) -> Result<ProbeReport, ProbeError> {
        // The staged file must be complete on disk while it is probed
        let staged = tokio::fs::read(path).await.map_err(ProbeError::Spawn)?;
        if staged.is_empty() {
            return Err(ProbeError::NoStreams);
        }

        match *self {
            FakeProbe::Dimensions(width, height) => Ok(ProbeReport {
                streams: vec![ProbeStream {
                    codec_type: Some("video".to_string()),
                    width: Some(width),
                    height: Some(height),
                }],
            }),
            FakeProbe::Failing => Err(ProbeError::Failed {
                status: "exit status: 1".to_string(),
                stderr: format!("{}: Invalid data found when processing input", path.display()),
            }),
        }
    }
}
