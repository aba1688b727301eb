//! Result of a single prediction fetch.

use super::types::PredictionSet;

/// What a fetch produced. Every failure is a value; nothing is thrown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// At least one prediction, in upstream order.
    Success(PredictionSet),

    /// The response was well formed but listed no trains.
    EmptyStation,

    /// No usable response reached us.
    TransportFailure(TransportFailure),

    /// A 200 response whose body broke the expected contract.
    MalformedResponse(String),
}

impl FetchOutcome {
    /// Whether predictions were returned.
    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success(_))
    }
}

/// Why the transport layer failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportFailure {
    /// The API answered with a status other than 200
    #[error("API returned status {0}")]
    Status(u16),

    /// Both the verified and unverified attempts failed
    #[error("{0}")]
    Connection(String),
}
