//! Catalog configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults point at the public demo
//! catalog service.
//!
//! - `VIORRA_CATALOG_URL` - Base URL of the product catalog API
//!   (default: <https://dummyjson.com>)
//! - `VIORRA_CATALOG_TIMEOUT_SECS` - Per-request timeout in seconds
//!   (default: 10)

use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_BASE_URL: &str = "https://dummyjson.com";
const DEFAULT_TIMEOUT_SECS: &str = "10";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Catalog API configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog API, without a trailing slash.
    pub base_url: String,
    /// Upper bound on each catalog request.
    pub timeout: Duration,
    /// Page-size limits for catalog requests.
    pub limits: CatalogLimits,
}

/// Fixed page-size limits for catalog requests.
///
/// These are contract constants of the catalog collaborator, not
/// tunables: the bulk fetch reads at most 100 raw records and remote
/// search at most 50.
#[derive(Debug, Clone, Copy)]
pub struct CatalogLimits {
    /// Maximum raw records fetched for the bulk catalog request.
    pub catalog_page: u32,
    /// Maximum raw records fetched for a remote search.
    pub search_page: u32,
}

impl Default for CatalogLimits {
    fn default() -> Self {
        Self {
            catalog_page: 100,
            search_page: 50,
        }
    }
}

impl CatalogConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = parse_base_url(
            "VIORRA_CATALOG_URL",
            &get_env_or_default("VIORRA_CATALOG_URL", DEFAULT_BASE_URL),
        )?;
        let timeout = parse_timeout_secs(
            "VIORRA_CATALOG_TIMEOUT_SECS",
            &get_env_or_default("VIORRA_CATALOG_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS),
        )?;

        Ok(Self {
            base_url,
            timeout,
            limits: CatalogLimits::default(),
        })
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
            limits: CatalogLimits::default(),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate a base URL and normalize it (no trailing slash).
fn parse_base_url(key: &str, value: &str) -> Result<String, ConfigError> {
    let url =
        Url::parse(value).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(value.trim_end_matches('/').to_string())
}

/// Parse a positive timeout in whole seconds.
fn parse_timeout_secs(key: &str, value: &str) -> Result<Duration, ConfigError> {
    let secs = value
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if secs == 0 {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "timeout must be at least 1 second".to_string(),
        ));
    }
    Ok(Duration::from_secs(secs))
}
