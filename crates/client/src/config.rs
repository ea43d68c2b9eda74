//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `FRESHCART_API_BASE_URL` - Remote API base URL
//!   (default: `https://ecommerce.routemisr.com/api/v1`)
//! - `FRESHCART_STATE_DIR` - Directory for the persisted session store
//!   (default: `.freshcart`)
//! - `FRESHCART_HTTP_TIMEOUT_SECS` - Request timeout in seconds (default: 30)
//! - `FRESHCART_CATALOG_CACHE_SECS` - Catalog response cache TTL (default: 300)
//! - `FRESHCART_CATALOG_CACHE_CAP` - Catalog cache capacity (default: 256)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default base URL of the remote e-commerce API.
pub const DEFAULT_API_BASE_URL: &str = "https://ecommerce.routemisr.com/api/v1";

const DEFAULT_STATE_DIR: &str = ".freshcart";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
const DEFAULT_CATALOG_CACHE_SECS: u64 = 300;
const DEFAULT_CATALOG_CACHE_CAP: u64 = 256;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Remote API base URL.
    pub api_base_url: Url,
    /// Directory holding the persisted session store.
    pub state_dir: PathBuf,
    /// Per-request HTTP timeout.
    pub http_timeout: Duration,
    /// TTL for cached catalog responses.
    pub catalog_cache_ttl: Duration,
    /// Maximum number of cached catalog responses.
    pub catalog_cache_capacity: u64,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = get_env_or_default("FRESHCART_API_BASE_URL", DEFAULT_API_BASE_URL)
            .parse::<Url>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("FRESHCART_API_BASE_URL".to_string(), e.to_string())
            })?;

        let state_dir = PathBuf::from(get_env_or_default("FRESHCART_STATE_DIR", DEFAULT_STATE_DIR));

        let http_timeout = Duration::from_secs(parse_env_or(
            "FRESHCART_HTTP_TIMEOUT_SECS",
            DEFAULT_HTTP_TIMEOUT_SECS,
        )?);
        let catalog_cache_ttl = Duration::from_secs(parse_env_or(
            "FRESHCART_CATALOG_CACHE_SECS",
            DEFAULT_CATALOG_CACHE_SECS,
        )?);
        let catalog_cache_capacity =
            parse_env_or("FRESHCART_CATALOG_CACHE_CAP", DEFAULT_CATALOG_CACHE_CAP)?;

        Ok(Self {
            api_base_url,
            state_dir,
            http_timeout,
            catalog_cache_ttl,
            catalog_cache_capacity,
        })
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            // The default is a compile-time constant and always parses.
            api_base_url: Url::parse(DEFAULT_API_BASE_URL)
                .unwrap_or_else(|_| unreachable!("default base URL is valid")),
            state_dir: PathBuf::from(DEFAULT_STATE_DIR),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            catalog_cache_ttl: Duration::from_secs(DEFAULT_CATALOG_CACHE_SECS),
            catalog_cache_capacity: DEFAULT_CATALOG_CACHE_CAP,
        }
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable as `u64`, falling back to a default.
fn parse_env_or(key: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(key) {
        Ok(value) => value
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base_url.as_str(), DEFAULT_API_BASE_URL);
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert_eq!(config.catalog_cache_capacity, 256);
    }

    #[test]
    fn test_default_base_url_parses() {
        assert!(Url::parse(DEFAULT_API_BASE_URL).is_ok());
    }
}
