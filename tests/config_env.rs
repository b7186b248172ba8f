//! Configuration loading from the process environment
//!
//! These tests mutate process-wide environment variables, so they run
//! serially.

use std::path::PathBuf;
use std::time::Duration;

use serial_test::serial;
use userdesk::app::config::{ENV_API_URL, ENV_CREDENTIALS, ENV_OAUTH_CLIENT_ID, ENV_TIMEOUT_SECS};
use userdesk::app::Config;
use userdesk::shared::ConfigError;

fn clear_env() {
    for name in [ENV_API_URL, ENV_CREDENTIALS, ENV_TIMEOUT_SECS, ENV_OAUTH_CLIENT_ID] {
        std::env::remove_var(name);
    }
}

fn no_settings_file() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    (dir, path)
}

#[test]
#[serial]
fn test_load_defaults() {
    clear_env();
    let (_dir, file) = no_settings_file();

    let config = Config::load(Some(&file)).unwrap();
    assert_eq!(config.base_url(), "https://reqres.in/api");
    assert_eq!(config.request_timeout(), None);
}

#[test]
#[serial]
fn test_load_from_env() {
    clear_env();
    std::env::set_var(ENV_API_URL, "http://127.0.0.1:4010/api");
    std::env::set_var(ENV_TIMEOUT_SECS, "30");
    std::env::set_var(ENV_OAUTH_CLIENT_ID, "client.apps.googleusercontent.com");
    let (_dir, file) = no_settings_file();

    let config = Config::load(Some(&file)).unwrap();
    assert_eq!(config.api_url("/users"), "http://127.0.0.1:4010/api/users");
    assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
    assert_eq!(config.oauth_client_id(), Some("client.apps.googleusercontent.com"));

    clear_env();
}

#[test]
#[serial]
fn test_load_rejects_invalid_env_url() {
    clear_env();
    std::env::set_var(ENV_API_URL, "definitely not a url");
    let (_dir, file) = no_settings_file();

    let result = Config::load(Some(&file));
    assert!(matches!(result, Err(ConfigError::InvalidUrl(_))));

    clear_env();
}

#[test]
#[serial]
fn test_load_rejects_zero_timeout() {
    clear_env();
    std::env::set_var(ENV_TIMEOUT_SECS, "0");
    let (_dir, file) = no_settings_file();

    let result = Config::load(Some(&file));
    assert!(matches!(result, Err(ConfigError::InvalidTimeout)));

    clear_env();
}

#[test]
#[serial]
fn test_settings_file_malformed() {
    clear_env();
    let (_dir, file) = no_settings_file();
    std::fs::write(&file, "timeout_secs = \"ten\"").unwrap();

    let result = Config::load(Some(&file));
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}
