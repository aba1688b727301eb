//! Fixture transport for running without API access.
//!
//! Loads sample responses from JSON files and serves them as if they were
//! live API responses.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use super::error::PredictionError;
use super::transport::{PredictionRequest, RawResponse, TlsMode, Transport, TransportError};

/// Transport that serves response bodies from a directory.
///
/// Expects files named `{CODE}.json` (e.g. `N12.json`). Bodies are kept
/// verbatim, so a broken fixture exercises the malformed-response path.
#[derive(Debug, Clone)]
pub struct FixtureTransport {
    bodies: Arc<HashMap<String, String>>,
}

impl FixtureTransport {
    /// Load every `.json` file in `data_dir`.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, PredictionError> {
        let data_dir = data_dir.as_ref();
        let fixtures_error = |message: String| PredictionError::Fixtures {
            path: data_dir.to_path_buf(),
            message,
        };

        let entries = std::fs::read_dir(data_dir)
            .map_err(|e| fixtures_error(format!("failed to read directory: {e}")))?;

        let mut bodies = HashMap::new();
        for entry in entries {
            let path = entry
                .map_err(|e| fixtures_error(format!("failed to read directory entry: {e}")))?
                .path();

            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let Some(code) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let body = std::fs::read_to_string(&path)
                .map_err(|e| fixtures_error(format!("failed to read {}: {e}", path.display())))?;

            bodies.insert(code.to_string(), body);
        }

        if bodies.is_empty() {
            return Err(fixtures_error("no fixture files found".to_string()));
        }

        Ok(Self {
            bodies: Arc::new(bodies),
        })
    }

    /// Station codes with a fixture, sorted.
    pub fn available_codes(&self) -> Vec<&str> {
        let mut codes: Vec<_> = self.bodies.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }
}

impl Transport for FixtureTransport {
    async fn get(
        &self,
        request: &PredictionRequest,
        _tls: TlsMode,
    ) -> Result<RawResponse, TransportError> {
        let code = request.url.rsplit('/').next().unwrap_or_default();

        Ok(match self.bodies.get(code) {
            Some(body) => RawResponse::new(200, body.clone()),
            None => RawResponse::new(404, format!("no fixture for station {code}")),
        })
    }
}
