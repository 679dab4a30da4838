//! Runtime configuration resolved from the environment.
//!
//! API base URL: `--api-url` > SWARMY_API_URL > VITE_API_URL > localhost default.
//! A `.env` file in the working directory is loaded by `main` before this runs.

use std::time::Duration;

use thiserror::Error;

use crate::store::vault::DEFAULT_SERVICE_NAME;

pub const DEFAULT_API_URL: &str = "http://localhost:3000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API URL must start with http:// or https://, got {0:?}")]
    InvalidApiUrl(String),

    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL without a trailing slash.
    pub api_url: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Keychain service the access token is stored under.
    pub keychain_service: String,
}

impl Config {
    pub fn new(api_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: normalize_api_url(api_url)?,
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            keychain_service: DEFAULT_SERVICE_NAME.to_string(),
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("SWARMY_API_URL")
            .or_else(|| lookup("VITE_API_URL"))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let mut config = Self::new(&api_url)?;

        if let Some(raw) = lookup("SWARMY_HTTP_TIMEOUT_SECS") {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: "SWARMY_HTTP_TIMEOUT_SECS",
                value: raw.clone(),
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(service) = lookup("SWARMY_KEYCHAIN_SERVICE") {
            if !service.trim().is_empty() {
                config.keychain_service = service;
            }
        }

        Ok(config)
    }

    /// Apply a command-line override of the API URL.
    pub fn with_api_url(mut self, api_url: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(url) = api_url {
            self.api_url = normalize_api_url(url)?;
        }
        Ok(self)
    }
}

fn normalize_api_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidApiUrl(raw.to_string()));
    }
    Ok(trimmed.to_string())
}
