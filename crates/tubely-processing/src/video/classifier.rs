use std::path::Path;
use std::sync::Arc;

use tubely_core::AspectRatio;

use super::probe::{MediaProbe, ProbeError};

pub const WIDE_RATIO: f64 = 16.0 / 9.0;
pub const TALL_RATIO: f64 = 9.0 / 16.0;
/// Maximum absolute distance from a target ratio that still counts as a match
pub const RATIO_TOLERANCE: f64 = 0.01;

/// Bucket a width/height pair. Wide is checked before tall.
pub fn classify_dimensions(width: u32, height: u32) -> AspectRatio {
    let ratio = f64::from(width) / f64::from(height);
    if (ratio - WIDE_RATIO).abs() <= RATIO_TOLERANCE {
        AspectRatio::Wide
    } else if (ratio - TALL_RATIO).abs() <= RATIO_TOLERANCE {
        AspectRatio::Tall
    } else {
        AspectRatio::Other
    }
}

/// Classifies staged videos by the dimensions of their first stream
#[derive(Clone)]
pub struct AspectRatioClassifier {
    probe: Arc<dyn MediaProbe>,
}

impl AspectRatioClassifier {
    pub fn new(probe: Arc<dyn MediaProbe>) -> Self {
        Self { probe }
    }

    #[tracing::instrument(skip(self))]
    pub async fn classify(&self, path: &Path) -> Result<AspectRatio, ProbeError> {
        let report = self.probe.probe(path).await?;
        let stream = report.streams.first().ok_or(ProbeError::NoStreams)?;

        let (width, height) = match (stream.width, stream.height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => (w, h),
            (width, height) => return Err(ProbeError::MissingDimensions { width, height }),
        };

        let aspect = classify_dimensions(width, height);
        tracing::info!(width, height, aspect = %aspect, "Video classified");
        Ok(aspect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video::probe::{ProbeReport, ProbeStream};
    use async_trait::async_trait;

    struct FixedProbe(ProbeReport);

    #[async_trait]
    impl MediaProbe for FixedProbe {
        async fn probe(&self, _path: &Path) -> Result<ProbeReport, ProbeError> {
            Ok(self.0.clone())
        }
    }

    fn classifier(streams: Vec<ProbeStream>) -> AspectRatioClassifier {
        AspectRatioClassifier::new(Arc::new(FixedProbe(ProbeReport { streams })))
    }

    fn video_stream(width: u32, height: u32) -> ProbeStream {
        ProbeStream {
            codec_type: Some("video".to_string()),
            width: Some(width),
            height: Some(height),
        }
    }

    #[test]
    fn test_common_resolutions() {
        assert_eq!(classify_dimensions(1920, 1080), AspectRatio::Wide);
        assert_eq!(classify_dimensions(1280, 720), AspectRatio::Wide);
        assert_eq!(classify_dimensions(1080, 1920), AspectRatio::Tall);
        assert_eq!(classify_dimensions(720, 1280), AspectRatio::Tall);
        assert_eq!(classify_dimensions(1000, 1000), AspectRatio::Other);
        assert_eq!(classify_dimensions(640, 480), AspectRatio::Other);
    }

    #[test]
    fn test_near_ratios_within_tolerance() {
        // 1366x768 is 1.7786, off 16:9 by less than 0.01
        assert_eq!(classify_dimensions(1366, 768), AspectRatio::Wide);
        // 608x1080 is 0.5630, off 9:16 by less than 0.01
        assert_eq!(classify_dimensions(608, 1080), AspectRatio::Tall);
        // 1800x1000 is 1.8, off 16:9 by more than 0.01
        assert_eq!(classify_dimensions(1800, 1000), AspectRatio::Other);
    }

    #[tokio::test]
    async fn test_classify_uses_first_stream() {
        let c = classifier(vec![
            video_stream(1080, 1920),
            video_stream(1920, 1080),
        ]);
        assert_eq!(
            c.classify(Path::new("clip.mp4")).await.unwrap(),
            AspectRatio::Tall
        );
    }

    #[tokio::test]
    async fn test_empty_stream_list_is_probe_error() {
        let c = classifier(vec![]);
        assert!(matches!(
            c.classify(Path::new("clip.mp4")).await,
            Err(ProbeError::NoStreams)
        ));
    }

    #[tokio::test]
    async fn test_stream_without_dimensions_is_probe_error() {
        let c = classifier(vec![ProbeStream {
            codec_type: Some("audio".to_string()),
            width: None,
            height: None,
        }]);
        assert!(matches!(
            c.classify(Path::new("clip.mp4")).await,
            Err(ProbeError::MissingDimensions { .. })
        ));

        let c = classifier(vec![video_stream(1920, 0)]);
        assert!(matches!(
            c.classify(Path::new("clip.mp4")).await,
            Err(ProbeError::MissingDimensions { .. })
        ));
    }
}
