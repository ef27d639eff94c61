use std::env;
use std::time::Duration;

use crate::error::ConfigError;
use crate::progress_tracker::DEFAULT_SYNC_INTERVAL;

pub const BASE_URL_VAR: &str = "ENGAGE_API_BASE_URL";
pub const ACCESS_TOKEN_VAR: &str = "ENGAGE_ACCESS_TOKEN";
pub const SYNC_INTERVAL_VAR: &str = "ENGAGE_SYNC_INTERVAL_SECS";

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Where the backend lives and how to talk to it.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub access_token: Option<String>,
    pub sync_interval: Duration,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("sync_interval", &self.sync_interval)
            .finish()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token: None,
            sync_interval: DEFAULT_SYNC_INTERVAL,
        }
    }
}

impl ApiConfig {
    /// Read `ENGAGE_*` variables from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a malformed sync interval.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a malformed sync interval.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let base_url = read(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let access_token = read(ACCESS_TOKEN_VAR).map(|token| token.trim().to_string());
        let sync_interval = match read(SYNC_INTERVAL_VAR) {
            Some(raw) => parse_interval(SYNC_INTERVAL_VAR, &raw)?,
            None => DEFAULT_SYNC_INTERVAL,
        };

        Ok(Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            access_token,
            sync_interval,
        })
    }
}

/// Whole seconds, strictly positive.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` when `raw` is not a positive integer.
pub fn parse_interval(key: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidValue {
            key,
            raw: raw.to_string(),
        }),
    }
}
