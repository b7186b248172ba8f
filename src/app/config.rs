use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::shared::config::{AppConfig, AppConfigBuilder, ConfigError};

/// Environment variable overriding the API base URL
pub const ENV_API_URL: &str = "USERDESK_API_URL";
/// Environment variable overriding the credential file path
pub const ENV_CREDENTIALS: &str = "USERDESK_CREDENTIALS";
/// Environment variable setting the request timeout in seconds
pub const ENV_TIMEOUT_SECS: &str = "USERDESK_TIMEOUT_SECS";
/// Environment variable setting the OAuth client id
pub const ENV_OAUTH_CLIENT_ID: &str = "USERDESK_OAUTH_CLIENT_ID";

/// Optional settings file, `<config dir>/userdesk/config.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    api_url: Option<String>,
    credentials: Option<PathBuf>,
    timeout_secs: Option<u64>,
    oauth_client_id: Option<String>,
}

/// Application configuration wrapper.
#[derive(Debug, Clone, Default)]
pub struct Config {
    app: AppConfig,
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builder(builder: AppConfigBuilder) -> Result<Self, ConfigError> {
        let app = builder.build()?;
        Ok(Self { app })
    }

    /// Defaults, then the settings file (if present), then the environment.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let path = file.map(Path::to_path_buf).unwrap_or_else(Self::default_file_path);
        let builder = apply_file(AppConfig::builder(), &path)?;
        let builder = apply_env(builder, |name| std::env::var(name).ok())?;
        Self::with_builder(builder)
    }

    /// `<config dir>/userdesk/config.toml`
    pub fn default_file_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(std::env::temp_dir);
        path.push("userdesk");
        path.push("config.toml");
        path
    }

    /// Get the full URL for an API endpoint
    pub fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.app.api_url, path)
    }

    pub fn base_url(&self) -> &str {
        &self.app.api_url
    }

    /// Credential file location, falling back to the platform default
    pub fn credentials_path(&self) -> PathBuf {
        self.app
            .credentials_path
            .clone()
            .unwrap_or_else(crate::app::FileCredentialStore::default_path)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.app.request_timeout
    }

    pub fn oauth_client_id(&self) -> Option<&str> {
        self.app.oauth_client_id.as_deref()
    }

    pub fn app(&self) -> &AppConfig {
        &self.app
    }
}

fn apply_file(mut builder: AppConfigBuilder, path: &Path) -> Result<AppConfigBuilder, ConfigError> {
    if !path.exists() {
        return Ok(builder);
    }
    tracing::debug!("Loading settings from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    let file: ConfigFile = toml::from_str(&content)?;

    if let Some(url) = file.api_url {
        builder = builder.api_url(url);
    }
    if let Some(credentials) = file.credentials {
        builder = builder.credentials_path(credentials);
    }
    if let Some(secs) = file.timeout_secs {
        builder = builder.request_timeout(Duration::from_secs(secs));
    }
    if let Some(client_id) = file.oauth_client_id {
        builder = builder.oauth_client_id(client_id);
    }
    Ok(builder)
}

fn apply_env<F>(mut builder: AppConfigBuilder, lookup: F) -> Result<AppConfigBuilder, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(ENV_API_URL) {
        builder = builder.api_url(url);
    }
    if let Some(credentials) = lookup(ENV_CREDENTIALS) {
        builder = builder.credentials_path(credentials);
    }
    if let Some(value) = lookup(ENV_TIMEOUT_SECS) {
        let secs = value
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidValue { name: ENV_TIMEOUT_SECS, value })?;
        builder = builder.request_timeout(Duration::from_secs(secs));
    }
    if let Some(client_id) = lookup(ENV_OAUTH_CLIENT_ID) {
        builder = builder.oauth_client_id(client_id);
    }
    Ok(builder)
}
