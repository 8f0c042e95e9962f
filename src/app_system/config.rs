//! Deployment configuration.

use std::env;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Where the `orderdetails` collection lives unless overridden.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api/orderdetails";

/// Environment variable overriding the backend base URL.
pub const API_URL_VAR: &str = "ORDERFLOW_API_URL";

const DEFAULT_PROBE_INTERVAL: Duration = Duration::from_secs(15);
const DEFAULT_CHANNEL_CAPACITY: usize = 32;

#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Invalid ORDERFLOW_API_URL: {0}")]
    InvalidApiUrl(url::ParseError),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: Url,
    pub probe_interval: Duration,
    pub channel_capacity: usize,
}

impl Config {
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            probe_interval: DEFAULT_PROBE_INTERVAL,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    /// Build the configuration from the environment, falling back to the
    /// default backend location.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = env::var(API_URL_VAR).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let api_url = Url::parse(&raw).map_err(ConfigError::InvalidApiUrl)?;
        Ok(Self::new(api_url))
    }
}
