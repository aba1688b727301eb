//! Next-train prediction client.
//!
//! This module provides an HTTP client for a real-time station prediction
//! API (`GET {base}/{station_code}`), returning raw prediction records.
//!
//! Key characteristics of the API:
//! - Authentication is a static key sent in the `api_key` header
//! - `Min` is a display token: usually a number, but "ARR" and "BRD" are
//!   sent for arriving and boarding trains
//! - Payload variants disagree on the destination field name

mod client;
mod error;
mod mock;
mod outcome;
#[cfg(test)]
pub(crate) mod testing;
mod transport;
mod types;

pub use client::{
    API_KEY_HEADER, ApiKey, DEFAULT_BASE_URL, PredictionConfig, PredictionFetcher,
    classify_response,
};
pub use error::PredictionError;
pub use mock::FixtureTransport;
pub use outcome::{FetchOutcome, TransportFailure};
pub use transport::{
    HttpTransport, PredictionRequest, RawResponse, TlsMode, Transport, TransportError,
};
pub use types::{PredictionRecord, PredictionResponse, PredictionSet};
