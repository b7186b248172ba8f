//! Application configuration module
//!
//! Provides the validated configuration shared by the library and the CLI.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;
use thiserror::Error;

/// Default base URL of the users collection
pub const DEFAULT_API_URL: &str = "https://reqres.in/api";

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the remote API, without a trailing slash
    pub api_url: String,
    /// Where the durable credential store lives, if not the default path
    pub credentials_path: Option<PathBuf>,
    /// Upper bound for a single request. `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
    /// OAuth client id used to build the consent URL
    pub oauth_client_id: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            credentials_path: None,
            request_timeout: None,
            oauth_client_id: None,
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Builder seeded with this configuration, for layering overrides
    pub fn to_builder(&self) -> AppConfigBuilder {
        AppConfigBuilder {
            api_url: Some(self.api_url.clone()),
            credentials_path: self.credentials_path.clone(),
            request_timeout: self.request_timeout,
            oauth_client_id: self.oauth_client_id.clone(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.api_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", self.api_url, e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidUrl(format!(
                "{}: scheme must be http or https",
                self.api_url
            )));
        }
        if self.request_timeout == Some(Duration::ZERO) {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(())
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    api_url: Option<String>,
    credentials_path: Option<PathBuf>,
    request_timeout: Option<Duration>,
    oauth_client_id: Option<String>,
}

impl AppConfigBuilder {
    /// Set the API base URL
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    /// Set the credential file path
    pub fn credentials_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_path = Some(path.into());
        self
    }

    /// Bound every request by `timeout`
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Set the OAuth client id
    pub fn oauth_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.oauth_client_id = Some(client_id.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let api_url = self
            .api_url
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let config = AppConfig {
            api_url,
            credentials_path: self.credentials_path,
            request_timeout: self.request_timeout,
            oauth_client_id: self.oauth_client_id,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("request timeout must be greater than zero")]
    InvalidTimeout,
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}
