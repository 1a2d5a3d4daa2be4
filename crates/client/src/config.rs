//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `SHOP_API_URL` - Host serving the user, product and basket APIs (default: `http://localhost:8081`)
//! - `SHOP_PAYMENT_API_URL` - Host serving the payment API (default: `http://localhost:8084`)
//! - `SHOP_LOGIN_PATH` - Login entry point passed to the redirect hook (default: `/login`)
//! - `SHOP_SESSION_FILE` - Path of the file-backed session store

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "http://localhost:8081";
const DEFAULT_PAYMENT_API_URL: &str = "http://localhost:8084";
const DEFAULT_LOGIN_PATH: &str = "/login";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Invalid URL {0}: {1}")]
    InvalidUrl(String, String),
}

/// Endpoints and paths used to build a [`ShopClient`](crate::ShopClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the user, product and basket backends
    pub api_url: Url,
    /// Base URL of the payment backend
    pub payment_api_url: Url,
    /// Login entry point handed to the redirect hook on 401
    pub login_path: String,
    /// File backing the persistent session, if configured
    pub session_file: Option<PathBuf>,
}

impl ClientConfig {
    /// Configuration pointing every domain at `api_url`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if `api_url` is not an absolute URL.
    pub fn new(api_url: &str) -> Result<Self, ConfigError> {
        let api_url = parse_url(api_url)?;
        Ok(Self {
            payment_api_url: api_url.clone(),
            api_url,
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            session_file: None,
        })
    }

    /// Point the payment service at a separate host.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if `url` is not an absolute URL.
    pub fn with_payment_api_url(mut self, url: &str) -> Result<Self, ConfigError> {
        self.payment_api_url = parse_url(url)?;
        Ok(self)
    }

    /// Override the login entry point.
    #[must_use]
    pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    /// Set the session file.
    #[must_use]
    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = Some(path.into());
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a URL variable is set but not a valid absolute URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = get_url_env("SHOP_API_URL", DEFAULT_API_URL)?;
        let payment_api_url = get_url_env("SHOP_PAYMENT_API_URL", DEFAULT_PAYMENT_API_URL)?;
        let login_path = get_env_or_default("SHOP_LOGIN_PATH", DEFAULT_LOGIN_PATH);
        let session_file = get_optional_env("SHOP_SESSION_FILE").map(PathBuf::from);

        Ok(Self {
            api_url,
            payment_api_url,
            login_path,
            session_file,
        })
    }
}

fn parse_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(raw.to_string(), e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl(
            raw.to_string(),
            "not a base URL".to_string(),
        ));
    }
    Ok(url)
}

/// Get a URL environment variable with a default value.
fn get_url_env(key: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = get_env_or_default(key, default);
    parse_url(&raw).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_one_host_for_everything() {
        let config = ClientConfig::new("http://shop.test:9000").unwrap();
        assert_eq!(config.api_url.as_str(), "http://shop.test:9000/");
        assert_eq!(config.payment_api_url, config.api_url);
        assert_eq!(config.login_path, "/login");
        assert!(config.session_file.is_none());
    }

    #[test]
    fn test_builder_overrides() {
        let config = ClientConfig::new("http://localhost:8081")
            .unwrap()
            .with_payment_api_url("http://localhost:8084")
            .unwrap()
            .with_login_path("/signin")
            .with_session_file("/tmp/session.json");

        assert_eq!(config.payment_api_url.port(), Some(8084));
        assert_eq!(config.login_path, "/signin");
        assert_eq!(
            config.session_file,
            Some(PathBuf::from("/tmp/session.json"))
        );
    }

    #[test]
    fn test_rejects_relative_url() {
        let err = ClientConfig::new("localhost/api").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl(..)));
    }

    #[test]
    fn test_rejects_non_base_url() {
        let err = ClientConfig::new("mailto:shop@example.com").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl(..)));
    }
}
