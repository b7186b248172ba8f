//! Mock server helpers for integration tests
//!
//! Stands up a wiremock server playing the remote users API and builds
//! clients pointed at it.

use std::time::Duration;

use serde_json::{json, Value};
use userdesk::app::{Config, MemoryCredentialStore, SessionGatedClient};
use userdesk::shared::AppConfig;
use wiremock::MockServer;

/// Token cached by [`authed_client`]
pub const TEST_TOKEN: &str = "test-access-token";

/// `Authorization` header value expected for [`TEST_TOKEN`]
pub fn bearer() -> String {
    format!("Bearer {}", TEST_TOKEN)
}

/// The record used throughout the tests
pub fn janet() -> Value {
    json!({
        "id": 2,
        "first_name": "Janet",
        "last_name": "Weaver",
        "email": "janet.weaver@reqres.in"
    })
}

pub fn config_for(server: &MockServer) -> Config {
    Config::with_builder(AppConfig::builder().api_url(server.uri())).unwrap()
}

pub fn client_for(
    server: &MockServer,
    store: MemoryCredentialStore,
) -> SessionGatedClient<MemoryCredentialStore> {
    SessionGatedClient::new(config_for(server), store).unwrap()
}

/// Client with [`TEST_TOKEN`] already cached
pub fn authed_client(server: &MockServer) -> SessionGatedClient<MemoryCredentialStore> {
    client_for(server, MemoryCredentialStore::with_credential(TEST_TOKEN))
}

/// Client with an empty store
pub fn anonymous_client(server: &MockServer) -> SessionGatedClient<MemoryCredentialStore> {
    client_for(server, MemoryCredentialStore::new())
}

/// Client whose requests give up after `timeout`
pub fn impatient_client(
    server: &MockServer,
    timeout: Duration,
) -> SessionGatedClient<MemoryCredentialStore> {
    let config = Config::with_builder(
        AppConfig::builder()
            .api_url(server.uri())
            .request_timeout(timeout),
    )
    .unwrap();
    SessionGatedClient::new(config, MemoryCredentialStore::with_credential(TEST_TOKEN)).unwrap()
}

/// Number of requests the mock server has seen
pub async fn request_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map(|requests| requests.len())
        .unwrap_or(0)
}
