//! Prediction API response DTOs.
//!
//! Every record field is optional: the API omits or nulls fields on
//! partial records, and some payload variants send numbers where others
//! send text. Values are kept as display tokens and never interpreted.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Top-level body of a `GetPrediction` response.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionResponse {
    /// Predictions for the station. `None` when the field is absent or null,
    /// which is a contract break rather than an empty station.
    #[serde(rename = "Trains")]
    pub trains: Option<Vec<PredictionRecord>>,
}

/// One arrival prediction, as sent by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PredictionRecord {
    /// Number of cars, or "-" when unknown.
    #[serde(rename = "Car", default, deserialize_with = "token")]
    pub car: Option<String>,

    /// Line identifier (e.g. "RD", "SV").
    #[serde(rename = "Line", default, deserialize_with = "token")]
    pub line: Option<String>,

    /// Full destination name.
    #[serde(rename = "DestinationName", default, deserialize_with = "token")]
    pub destination_name: Option<String>,

    /// Destination as sent by payload variants that lack `DestinationName`.
    #[serde(rename = "Destination", default, deserialize_with = "token")]
    pub destination: Option<String>,

    /// Minutes until arrival. May be a number or a token such as "ARR" or "BRD".
    #[serde(rename = "Min", default, deserialize_with = "token")]
    pub minutes: Option<String>,

    /// Platform/track grouping key.
    #[serde(rename = "Group", default, deserialize_with = "token")]
    pub group: Option<String>,
}

impl PredictionRecord {
    /// The destination under either field name.
    ///
    /// `DestinationName` wins when both are present; `Destination` is used
    /// only as a fallback.
    pub fn normalized_destination(&self) -> Option<&str> {
        self.destination_name
            .as_deref()
            .or(self.destination.as_deref())
    }
}

/// Ordered predictions for one station at one moment.
pub type PredictionSet = Vec<PredictionRecord>;

/// Accept a string, number or boolean as text; null and absent are `None`.
fn token<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a text or number token, found {other}"
        ))),
    }
}
