//! Prediction client error types.
//!
//! These only occur while building a client. Once built, fetches report
//! failures through [`FetchOutcome`](super::FetchOutcome).

use std::path::PathBuf;

/// Errors from constructing a prediction client or transport.
#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    /// The HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API key is empty or not usable as a header value
    #[error("invalid API key: {0}")]
    InvalidApiKey(&'static str),

    /// The fixture directory could not be loaded
    #[error("failed to load fixtures from {path:?}: {message}")]
    Fixtures { path: PathBuf, message: String },
}
