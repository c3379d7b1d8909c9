//! Chat server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CHAT_HOST` - Bind address (default: 127.0.0.1)
//! - `CHAT_PORT` - Listen port (default: 5173)
//! - `GROQ_API_KEY` - Chat-completion API key. Without it every chat request
//!   answers 500, but the server still starts.
//! - `GROQ_MODEL` - Model name (default: llama-3.1-8b-instant)
//! - `GROQ_API_URL` - Chat-completion endpoint

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
pub const DEFAULT_GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Chat server configuration.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Upstream provider settings
    pub groq: GroqConfig,
}

/// Chat-completion provider configuration.
#[derive(Debug, Clone)]
pub struct GroqConfig {
    /// API key; `None` until one is configured
    pub api_key: Option<SecretString>,
    pub model: String,
    pub api_url: String,
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_owned(),
            api_url: DEFAULT_GROQ_API_URL.to_owned(),
        }
    }
}

impl ChatConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `CHAT_HOST` or `CHAT_PORT`
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("CHAT_HOST", "127.0.0.1")
            .parse()
            .map_err(|e: std::net::AddrParseError| {
                ConfigError::InvalidEnvVar("CHAT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("CHAT_PORT", "5173")
            .parse()
            .map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidEnvVar("CHAT_PORT".to_string(), e.to_string())
            })?;

        let groq = GroqConfig {
            api_key: get_optional_env("GROQ_API_KEY").map(SecretString::from),
            model: get_env_or_default("GROQ_MODEL", DEFAULT_MODEL).trim().to_owned(),
            api_url: get_env_or_default("GROQ_API_URL", DEFAULT_GROQ_API_URL),
        };

        Ok(Self { host, port, groq })
    }

    /// Get the socket address for binding.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
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
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = ChatConfig {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 5173,
            groq: GroqConfig::default(),
        };
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:5173");
    }

    #[test]
    fn test_api_key_is_redacted_in_debug() {
        let groq = GroqConfig {
            api_key: Some(SecretString::from("gsk_live_123")),
            ..GroqConfig::default()
        };
        let debug = format!("{groq:?}");
        assert!(!debug.contains("gsk_live_123"));
        assert!(debug.contains(DEFAULT_MODEL));
    }
}
