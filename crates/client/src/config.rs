//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DIRECTUS_URL` - Base URL of the Directus instance (http or https)
//!
//! ## Optional
//! - `DIRECTUS_STORAGE_DIR` - Directory for persisted session records
//!   (default: `.creators-corner`)
//! - `DIRECTUS_REFRESH_MARGIN_MS` - Refresh tokens this long before they
//!   expire (default: 300000, five minutes)
//! - `DIRECTUS_TIMEOUT_SECS` - Per-request HTTP timeout (default: 30)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_STORAGE_DIR: &str = ".creators-corner";
const DEFAULT_REFRESH_MARGIN_MS: i64 = 300_000;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Directus client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root of the Directus instance, always ending in `/`
    pub directus_url: Url,
    /// Directory the file-backed token store writes to
    pub storage_dir: PathBuf,
    /// How long before expiry a token counts as due for refresh
    pub refresh_margin: chrono::Duration,
    /// Per-request HTTP timeout
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Configuration for `directus_url` with every optional setting defaulted.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the URL does not parse or is
    /// not http(s).
    pub fn new(directus_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            directus_url: parse_base_url("DIRECTUS_URL", directus_url)?,
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            refresh_margin: chrono::Duration::milliseconds(DEFAULT_REFRESH_MARGIN_MS),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `DIRECTUS_URL` is missing or any variable is
    /// invalid. There is no fallback URL: a client pointed at the wrong
    /// backend would send credentials there.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let directus_url = get_required(&lookup, "DIRECTUS_URL")?;
        let mut config = Self::new(&directus_url)?;

        if let Some(dir) = lookup("DIRECTUS_STORAGE_DIR").filter(|d| !d.trim().is_empty()) {
            config.storage_dir = PathBuf::from(dir);
        }

        if let Some(margin) = get_parsed::<i64>(&lookup, "DIRECTUS_REFRESH_MARGIN_MS")? {
            if margin < 0 {
                return Err(ConfigError::InvalidEnvVar(
                    "DIRECTUS_REFRESH_MARGIN_MS".to_string(),
                    "must not be negative".to_string(),
                ));
            }
            config.refresh_margin = chrono::Duration::milliseconds(margin);
        }

        if let Some(secs) = get_parsed::<u64>(&lookup, "DIRECTUS_TIMEOUT_SECS")? {
            if secs == 0 {
                return Err(ConfigError::InvalidEnvVar(
                    "DIRECTUS_TIMEOUT_SECS".to_string(),
                    "must be at least 1".to_string(),
                ));
            }
            config.request_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required, non-blank variable.
fn get_required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String, ConfigError> {
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional variable parsed as `T`.
fn get_parsed<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
        .transpose()
}

/// Parse a base URL and make sure relative joins stay under its path.
fn parse_base_url(key: &str, raw: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);

    Ok(url)
}
