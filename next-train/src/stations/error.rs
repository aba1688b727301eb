//! Station catalog error types.

use std::path::PathBuf;

use super::code::InvalidStationCode;

/// Errors from station lookup and catalog construction.
#[derive(Debug, thiserror::Error)]
pub enum StationError {
    /// The placeholder entry was selected; there is nothing to look up
    #[error("no station selected")]
    NoSelection,

    /// The name is not in the catalog
    #[error("unknown station: {0}")]
    UnknownStation(String),

    /// The same station name appears twice in the table
    #[error("duplicate station name: {0}")]
    DuplicateName(String),

    /// A station name is empty or collides with the placeholder
    #[error("invalid station name: {0:?}")]
    InvalidName(String),

    /// A station code in the table is malformed
    #[error(transparent)]
    InvalidCode(#[from] InvalidStationCode),

    /// The station file could not be read
    #[error("failed to read station file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The station file is not valid JSON
    #[error("failed to parse station file {path:?}: {message}")]
    Json { path: PathBuf, message: String },
}
