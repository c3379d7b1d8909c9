//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `KRONOS_API_URL` - Base URL of the REST backend, including the `/api`
//!   prefix (default: `http://localhost:3000/api`)
//! - `KRONOS_STATE_DIR` - Directory holding the file-backed client state

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Default backend address used when `KRONOS_API_URL` is unset.
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the REST backend (`.../api`), without a trailing slash
    pub api_url: String,
    /// Directory for persisted client state, if configured
    pub state_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            state_dir: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `KRONOS_API_URL` is not an
    /// absolute http(s) URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = parse_api_url(&get_env_or_default("KRONOS_API_URL", DEFAULT_API_URL))?;
        let state_dir = get_optional_env("KRONOS_STATE_DIR").map(PathBuf::from);

        Ok(Self { api_url, state_dir })
    }

    /// Configuration pointing at an explicit backend URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `api_url` is not an absolute
    /// http(s) URL.
    pub fn with_api_url(api_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: parse_api_url(api_url)?,
            state_dir: None,
        })
    }

    /// Base URL without a trailing slash, ready for path concatenation.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.api_url
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn parse_api_url(raw: &str) -> Result<String, ConfigError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar("KRONOS_API_URL".to_string(), e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url.as_str().trim_end_matches('/').to_owned()),
        other => Err(ConfigError::InvalidEnvVar(
            "KRONOS_API_URL".to_string(),
            format!("unsupported scheme: {other}"),
        )),
    }
}

/// Get an optional environment variable, treating blank values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_local_backend() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url(), "http://localhost:3000/api");
        assert!(config.state_dir.is_none());
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config = ClientConfig::with_api_url("https://shop.example.com/api/").unwrap();
        assert_eq!(config.base_url(), "https://shop.example.com/api");
    }

    #[test]
    fn test_relative_url_is_rejected() {
        let err = ClientConfig::with_api_url("/api").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "KRONOS_API_URL"));
    }

    #[test]
    fn test_non_http_scheme_is_rejected() {
        assert!(ClientConfig::with_api_url("ftp://example.com/api").is_err());
    }
}
