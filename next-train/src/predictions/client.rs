//! Prediction API client.
//!
//! Fetches next-train predictions for one station. A transport failure on
//! the normal path is retried exactly once with certificate validation
//! disabled, for hosts with a broken local trust store. Every result,
//! including failure, comes back as a [`FetchOutcome`].

use std::fmt;
use std::time::Duration;

use tracing::{debug, warn};

use crate::stations::StationCode;

use super::error::PredictionError;
use super::outcome::{FetchOutcome, TransportFailure};
use super::transport::{HttpTransport, PredictionRequest, RawResponse, TlsMode, Transport};
use super::types::PredictionResponse;

/// Default base URL for the prediction API.
pub const DEFAULT_BASE_URL: &str = "https://api.wmata.com/StationPrediction.svc/json/GetPrediction";

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "api_key";

/// API credential. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wrap a key, rejecting values that cannot be sent as a header.
    pub fn new(key: impl Into<String>) -> Result<Self, PredictionError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(PredictionError::InvalidApiKey("must not be empty"));
        }
        if !key.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(PredictionError::InvalidApiKey(
                "must be printable ASCII without spaces",
            ));
        }
        Ok(Self(key))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// Configuration for the prediction client.
#[derive(Debug, Clone)]
pub struct PredictionConfig {
    /// API key sent with every request
    pub api_key: ApiKey,
    /// Base URL; the station code is appended as the last path segment
    pub base_url: String,
    /// Per-attempt timeout. `None` leaves the transport default in place.
    pub timeout: Option<Duration>,
}

impl PredictionConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set a per-attempt timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Prediction API client over a [`Transport`].
#[derive(Debug, Clone)]
pub struct PredictionFetcher<T> {
    transport: T,
    base_url: String,
    api_key: ApiKey,
}

impl PredictionFetcher<HttpTransport> {
    /// Create a client that talks to the real API.
    pub fn new(config: PredictionConfig) -> Result<Self, PredictionError> {
        let transport = HttpTransport::new(config.timeout)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> PredictionFetcher<T> {
    /// Create a client over any transport.
    pub fn with_transport(config: PredictionConfig, transport: T) -> Self {
        Self {
            transport,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the request for a station.
    pub fn request_for(&self, code: &StationCode) -> PredictionRequest {
        PredictionRequest {
            url: format!("{}/{}", self.base_url, code.as_str()),
            headers: vec![
                ("Cache-Control", "no-cache".to_string()),
                (API_KEY_HEADER, self.api_key.expose().to_string()),
            ],
        }
    }

    /// Fetch current predictions for a station.
    pub async fn fetch(&self, code: &StationCode) -> FetchOutcome {
        let request = self.request_for(code);
        debug!(station = %code, url = %request.url, "requesting predictions");

        let response = match self.transport.get(&request, TlsMode::Verified).await {
            Ok(response) => response,
            Err(primary) => {
                warn!(
                    station = %code,
                    error = %primary,
                    "prediction request failed, retrying once without certificate validation"
                );
                match self.transport.get(&request, TlsMode::Unverified).await {
                    Ok(response) => response,
                    Err(fallback) => {
                        warn!(station = %code, error = %fallback, "unverified retry failed");
                        return FetchOutcome::TransportFailure(TransportFailure::Connection(
                            fallback.to_string(),
                        ));
                    }
                }
            }
        };

        let outcome = classify_response(&response);
        match &outcome {
            FetchOutcome::Success(records) => {
                debug!(station = %code, count = records.len(), "received predictions")
            }
            FetchOutcome::EmptyStation => debug!(station = %code, "no predictions"),
            FetchOutcome::TransportFailure(failure) => {
                warn!(station = %code, %failure, "prediction request rejected")
            }
            FetchOutcome::MalformedResponse(reason) => {
                warn!(station = %code, %reason, "malformed prediction response")
            }
        }
        outcome
    }
}

/// Turn a received response into an outcome.
///
/// Only a 200 body is parsed. An absent `Trains` field is malformed; a
/// present but empty one means the station has nothing scheduled.
pub fn classify_response(response: &RawResponse) -> FetchOutcome {
    if response.status != 200 {
        return FetchOutcome::TransportFailure(TransportFailure::Status(response.status));
    }

    let parsed: PredictionResponse = match serde_json::from_str(&response.body) {
        Ok(parsed) => parsed,
        Err(e) => return FetchOutcome::MalformedResponse(format!("invalid JSON: {e}")),
    };

    match parsed.trains {
        None => FetchOutcome::MalformedResponse("response has no Trains field".to_string()),
        Some(trains) if trains.is_empty() => FetchOutcome::EmptyStation,
        Some(trains) => FetchOutcome::Success(trains),
    }
}
