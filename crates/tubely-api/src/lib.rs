//! Tubely API Library
//!
//! HTTP handlers, authentication, the upload pipeline and application setup.

pub mod api_doc;
pub mod auth;
pub mod constants;
pub mod error;
pub mod extractors;
mod handlers;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use state::{AppState, UploadState};
