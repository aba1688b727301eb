//! Station name lookup.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::code::StationCode;
use super::error::StationError;

/// Selector entry meaning "nothing chosen yet".
pub const PLACEHOLDER: &str = "Select a station";

/// Stations offered when no station file is configured.
const DEFAULT_STATIONS: &[(&str, &str)] = &[
    ("Ashburn", "N12"),
    ("L'Enfant Plaza Upper", "F03"),
    ("L'Enfant Plaza Lower", "D03"),
    ("Reston Town Center", "N07"),
    ("Suitland", "F10"),
];

/// One row of a station file.
#[derive(Debug, Clone, Deserialize)]
pub struct StationEntry {
    pub name: String,
    pub code: StationCode,
}

/// Read-only mapping from display name to station code.
///
/// Built once at startup. Names keep the order they were given in, which
/// is the order the selector shows them.
#[derive(Debug, Clone)]
pub struct StationCatalog {
    entries: Vec<StationEntry>,
    by_name: HashMap<String, usize>,
}

impl StationCatalog {
    /// Build a catalog from entries, rejecting duplicate or reserved names.
    pub fn new(entries: Vec<StationEntry>) -> Result<Self, StationError> {
        let mut by_name = HashMap::with_capacity(entries.len());

        for (idx, entry) in entries.iter().enumerate() {
            if entry.name.trim().is_empty() || entry.name == PLACEHOLDER {
                return Err(StationError::InvalidName(entry.name.clone()));
            }
            if by_name.insert(entry.name.clone(), idx).is_some() {
                return Err(StationError::DuplicateName(entry.name.clone()));
            }
        }

        Ok(Self { entries, by_name })
    }

    /// The built-in station table.
    pub fn builtin() -> Result<Self, StationError> {
        let entries = DEFAULT_STATIONS
            .iter()
            .map(|(name, code)| -> Result<StationEntry, StationError> {
                Ok(StationEntry {
                    name: (*name).to_string(),
                    code: StationCode::parse(code)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(entries)
    }

    /// Load the table from a JSON file of `{"name", "code"}` objects.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StationError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| StationError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let entries: Vec<StationEntry> =
            serde_json::from_str(&contents).map_err(|e| StationError::Json {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Self::new(entries)
    }

    /// Look up the code for a display name.
    ///
    /// The placeholder yields [`StationError::NoSelection`], which callers
    /// treat as a prompt rather than a failure.
    pub fn lookup(&self, name: &str) -> Result<&StationCode, StationError> {
        if name == PLACEHOLDER {
            return Err(StationError::NoSelection);
        }

        self.by_name
            .get(name)
            .map(|&idx| &self.entries[idx].code)
            .ok_or_else(|| StationError::UnknownStation(name.to_string()))
    }

    /// Station names in selector order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// The "no selection" sentinel shown first in the selector.
    pub fn placeholder(&self) -> &'static str {
        PLACEHOLDER
    }

    /// Number of stations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no stations.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
