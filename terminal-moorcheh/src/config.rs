//! Moorcheh client configuration

use std::env;
use std::fmt;
use std::time::Duration;

use crate::error::MoorchehError;

/// Default Moorcheh API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.moorcheh.ai/v1";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the Moorcheh API
#[derive(Clone)]
pub struct MoorchehConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl fmt::Debug for MoorchehConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MoorchehConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl MoorchehConfig {
    /// Create a config for the production API
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Point the client at a different base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Load configuration from environment variables
    ///
    /// Expects:
    /// - MOORCHEH_API_KEY: API key (required, must not be blank)
    /// - MOORCHEH_BASE_URL: override for the API base URL (optional)
    /// - MOORCHEH_TIMEOUT_SECS: request timeout in seconds (optional)
    pub fn from_env() -> Result<Self, MoorchehError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, MoorchehError> {
        let api_key = lookup("MOORCHEH_API_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                MoorchehError::InvalidConfig(
                    "MOORCHEH_API_KEY environment variable is required".to_string(),
                )
            })?;

        let mut config = Self::new(api_key);

        if let Some(base_url) = lookup("MOORCHEH_BASE_URL")
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
        {
            config = config.with_base_url(base_url);
        }

        if let Some(raw) = lookup("MOORCHEH_TIMEOUT_SECS") {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                MoorchehError::InvalidConfig(format!(
                    "MOORCHEH_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                    raw
                ))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}
