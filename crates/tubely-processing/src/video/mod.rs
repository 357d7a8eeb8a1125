//! Video inspection: probing a staged file and classifying its aspect ratio

mod classifier;
mod probe;

pub use classifier::{
    classify_dimensions, AspectRatioClassifier, RATIO_TOLERANCE, TALL_RATIO, WIDE_RATIO,
};
pub use probe::{FfprobeProbe, MediaProbe, ProbeError, ProbeReport, ProbeStream};
