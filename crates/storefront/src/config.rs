//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `LOOM_LANE_CATALOG` - Catalog document, an `http(s)` URL or a file path
//!   (default: `data/products.json`)
//! - `LOOM_LANE_DATA_DIR` - Directory holding durable cart storage (default: `.loom-lane`)
//! - `LOOM_LANE_CATALOG_CACHE_SECS` - Cache fetched catalogs for this many seconds
//!   (default: 0, every read hits the source)
//! - `LOOM_LANE_CATALOG_TIMEOUT_SECS` - Request timeout for HTTP catalogs (default: none)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_CATALOG: &str = "data/products.json";
const DEFAULT_DATA_DIR: &str = ".loom-lane";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Where the product catalog is read from
    pub catalog: CatalogConfig,
    /// Directory for durable key/value storage
    pub data_dir: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production")
    pub sentry_environment: Option<String>,
}

/// Catalog source configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Catalog document location
    pub location: CatalogLocation,
    /// Time-to-live for cached catalogs; `None` disables caching
    pub cache_ttl: Option<Duration>,
    /// HTTP request timeout; `None` waits as long as the server does
    pub timeout: Option<Duration>,
}

/// Where the catalog document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogLocation {
    /// Fetched over HTTP(S)
    Url(Url),
    /// Read from the local filesystem
    File(PathBuf),
}

impl CatalogLocation {
    /// Interpret a configuration value.
    ///
    /// `http` and `https` URLs are fetched remotely; anything else is treated
    /// as a filesystem path.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match Url::parse(value) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Self::Url(url),
            _ => Self::File(PathBuf::from(value)),
        }
    }
}

impl std::fmt::Display for CatalogLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let catalog = CatalogConfig::from_env()?;
        let data_dir =
            PathBuf::from(get_env_or_default("LOOM_LANE_DATA_DIR", DEFAULT_DATA_DIR));

        Ok(Self {
            catalog,
            data_dir,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }
}

impl CatalogConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let location =
            CatalogLocation::parse(&get_env_or_default("LOOM_LANE_CATALOG", DEFAULT_CATALOG));
        let cache_ttl = get_optional_env("LOOM_LANE_CATALOG_CACHE_SECS")
            .map(|v| parse_seconds("LOOM_LANE_CATALOG_CACHE_SECS", &v))
            .transpose()?
            .flatten();
        let timeout = get_optional_env("LOOM_LANE_CATALOG_TIMEOUT_SECS")
            .map(|v| parse_seconds("LOOM_LANE_CATALOG_TIMEOUT_SECS", &v))
            .transpose()?
            .flatten();

        Ok(Self {
            location,
            cache_ttl,
            timeout,
        })
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            location: CatalogLocation::parse(DEFAULT_CATALOG),
            cache_ttl: None,
            timeout: None,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a whole number of seconds. Zero means "disabled".
fn parse_seconds(key: &str, value: &str) -> Result<Option<Duration>, ConfigError> {
    let secs = value
        .trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    Ok((secs > 0).then(|| Duration::from_secs(secs)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_location_url() {
        let location = CatalogLocation::parse("https://shop.example.lk/data/products.json");
        assert!(matches!(location, CatalogLocation::Url(_)));
    }

    #[test]
    fn test_catalog_location_relative_path() {
        let location = CatalogLocation::parse("data/products.json");
        assert_eq!(
            location,
            CatalogLocation::File(PathBuf::from("data/products.json"))
        );
    }

    #[test]
    fn test_catalog_location_file_url_is_path() {
        // Only http(s) is fetched remotely
        let location = CatalogLocation::parse("file:///srv/products.json");
        assert!(matches!(location, CatalogLocation::File(_)));
    }

    #[test]
    fn test_parse_seconds_zero_disables() {
        assert_eq!(parse_seconds("TEST_VAR", "0").unwrap(), None);
        assert_eq!(
            parse_seconds("TEST_VAR", " 30 ").unwrap(),
            Some(Duration::from_secs(30))
        );
    }

    #[test]
    fn test_parse_seconds_invalid() {
        let err = parse_seconds("TEST_VAR", "soon").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "TEST_VAR"));
    }

    #[test]
    fn test_default_catalog_config() {
        let config = CatalogConfig::default();
        assert_eq!(config.cache_ttl, None);
        assert_eq!(config.timeout, None);
        assert_eq!(config.location.to_string(), "data/products.json");
    }
}
