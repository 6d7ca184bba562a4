//! Library Export
//!
//! Exports a streaming user's saved-track library (save timestamps, catalog
//! metadata and audio features) to a dated CSV file. The internals are
//! exposed here so the integration tests in `tests/` can drive the pipeline
//! against a fake API.

pub mod api;
pub mod auth;
pub mod config;
pub mod export;
pub mod features;
pub mod join;
pub mod library;
pub mod pipeline;
pub mod progress;
pub mod tracks;

// Re-export commonly used types for convenience
pub use api::{ApiError, SavedTracksApi, WebApiClient};
pub use config::Params;
pub use pipeline::{run_export, ExportSummary};
