//! Tubely Processing Library
//!
//! Content checks and media inspection for uploads:
//!
//! - [`validator`]: magic-byte sniffing against per-kind allow-lists
//! - [`video`]: stream probing and aspect-ratio classification

pub mod validator;
pub mod video;

pub use validator::{sniff, validate_upload, SniffedType, ValidationError, SNIFF_PREFIX_LEN};
pub use video::{
    classify_dimensions, AspectRatioClassifier, FfprobeProbe, MediaProbe, ProbeError,
    ProbeReport, ProbeStream,
};
