//! Station code type.

use std::fmt;

use serde::{Deserialize, Deserializer};

/// Error returned when parsing an invalid station code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station code {code:?}: {reason}")]
pub struct InvalidStationCode {
    code: String,
    reason: &'static str,
}

/// An opaque station code understood by the prediction API (e.g. `N12`).
///
/// The code is placed verbatim in the request path, so it is restricted to
/// ASCII letters and digits. Beyond that the value carries no meaning here.
///
/// # Examples
///
/// ```
/// use next_train::stations::StationCode;
///
/// let code = StationCode::parse("F03").unwrap();
/// assert_eq!(code.as_str(), "F03");
///
/// assert!(StationCode::parse("").is_err());
/// assert!(StationCode::parse("F03/../x").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StationCode(String);

impl StationCode {
    /// Parse a station code from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidStationCode> {
        if s.is_empty() {
            return Err(InvalidStationCode {
                code: s.to_string(),
                reason: "must not be empty",
            });
        }

        if !s.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(InvalidStationCode {
                code: s.to_string(),
                reason: "must be ASCII letters and digits",
            });
        }

        Ok(StationCode(s.to_string()))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.0)
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for StationCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        StationCode::parse(&raw).map_err(serde::de::Error::custom)
    }
}
