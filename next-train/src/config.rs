//! Startup configuration from the environment.
//!
//! `main` loads a `.env` file from the working directory first, so a key
//! kept there works the same as an exported variable.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::predictions::{ApiKey, DEFAULT_BASE_URL, PredictionConfig, PredictionError};

pub const API_KEY_VAR: &str = "WMATA_API_KEY";
/// Older name for the key, as found in existing `.env` files.
pub const API_KEY_ALIAS_VAR: &str = "WMATA_Personal_Primary";
pub const BASE_URL_VAR: &str = "WMATA_BASE_URL";
pub const ADDR_VAR: &str = "NEXT_TRAIN_ADDR";
pub const STATIONS_VAR: &str = "NEXT_TRAIN_STATIONS";
pub const FIXTURES_VAR: &str = "NEXT_TRAIN_FIXTURES";
pub const STATIC_DIR_VAR: &str = "NEXT_TRAIN_STATIC_DIR";
pub const DEADLINE_VAR: &str = "NEXT_TRAIN_DEADLINE_SECS";

const DEFAULT_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_STATIC_DIR: &str = "static";
const DEFAULT_DEADLINE_SECS: u64 = 20;

/// Configuration errors. All of them stop the process at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("WMATA_API_KEY (or WMATA_Personal_Primary) is not set")]
    MissingApiKey,

    #[error("WMATA_API_KEY is not usable: {0}")]
    InvalidApiKey(#[source] PredictionError),

    #[error("NEXT_TRAIN_ADDR={value:?} is not a socket address: {source}")]
    InvalidAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("NEXT_TRAIN_DEADLINE_SECS={0:?} is not a positive number of seconds")]
    InvalidDeadline(String),
}

/// Everything read from the environment at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Credential for the prediction API
    pub api_key: ApiKey,
    /// Prediction endpoint; the station code is appended
    pub base_url: String,
    /// Address the web server listens on
    pub bind_addr: SocketAddr,
    /// Station table to use instead of the built-in one
    pub stations_file: Option<PathBuf>,
    /// Serve responses from this directory instead of the live API
    pub fixtures_dir: Option<PathBuf>,
    /// Stylesheet directory
    pub static_dir: PathBuf,
    /// Upper bound on one board request, fallback retry included
    pub deadline: Duration,
}

impl AppConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = get(API_KEY_VAR)
            .or_else(|| get(API_KEY_ALIAS_VAR))
            .ok_or(ConfigError::MissingApiKey)?;
        let api_key = ApiKey::new(api_key).map_err(ConfigError::InvalidApiKey)?;

        let addr = get(ADDR_VAR).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let bind_addr = addr
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::InvalidAddr {
                value: addr.clone(),
                source,
            })?;

        let deadline = match get(DEADLINE_VAR) {
            None => Duration::from_secs(DEFAULT_DEADLINE_SECS),
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidDeadline(raw)),
            },
        };

        Ok(Self {
            api_key,
            base_url: get(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            bind_addr,
            stations_file: get(STATIONS_VAR).map(PathBuf::from),
            fixtures_dir: get(FIXTURES_VAR).map(PathBuf::from),
            static_dir: get(STATIC_DIR_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
            deadline,
        })
    }

    /// Client configuration derived from this config.
    pub fn prediction_config(&self) -> PredictionConfig {
        PredictionConfig::new(self.api_key.clone()).with_base_url(&self.base_url)
    }
}
