/**
 * Authentication Module
 *
 * Login and logout for the session. The OAuth provider runs its consent
 * flow out of band; whatever access token it hands back becomes the
 * credential as-is, with no validation or exchange.
 */

use reqwest::Url;
use thiserror::Error;

use crate::app::credential_store::{Credential, CredentialStore};
use crate::shared::error::StoreError;

/// Google's OAuth 2.0 authorization endpoint
pub const GOOGLE_AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";

/// Scopes requested at consent time
pub const DEFAULT_SCOPES: &[&str] = &["profile", "email"];

/// Redirect for installed apps that paste the token back by hand
pub const DEFAULT_REDIRECT_URI: &str = "http://localhost";

/// Authentication state
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub authenticated: bool,
    pub error: Option<String>,
}

impl AuthState {
    /// State derived from whatever the store currently holds
    pub async fn from_store<S: CredentialStore>(store: &S) -> Self {
        Self {
            authenticated: store.get().await.is_some(),
            error: None,
        }
    }
}

/// Login/logout errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("access token is empty")]
    EmptyToken,
    #[error("no OAuth client id configured")]
    MissingClientId,
    #[error("invalid OAuth endpoint: {0}")]
    InvalidEndpoint(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Where to send the user for consent
#[derive(Debug, Clone)]
pub struct OAuthSettings {
    pub authorize_url: String,
    pub client_id: String,
    pub redirect_uri: String,
    pub scopes: Vec<String>,
}

impl OAuthSettings {
    /// Google settings for `client_id` with the default scopes
    pub fn google(client_id: impl Into<String>) -> Self {
        Self {
            authorize_url: GOOGLE_AUTHORIZE_URL.to_string(),
            client_id: client_id.into(),
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            scopes: DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Consent URL using the implicit grant (`response_type=token`)
    pub fn authorization_url(&self) -> Result<Url, AuthError> {
        if self.client_id.trim().is_empty() {
            return Err(AuthError::MissingClientId);
        }
        let scope = self.scopes.join(" ");
        Url::parse_with_params(
            &self.authorize_url,
            &[
                ("client_id", self.client_id.as_str()),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("response_type", "token"),
                ("scope", scope.as_str()),
            ],
        )
        .map_err(|e| AuthError::InvalidEndpoint(e.to_string()))
    }
}

/// Cache `access_token` verbatim as the session credential
pub async fn login<S: CredentialStore>(store: &S, access_token: &str) -> Result<(), AuthError> {
    if access_token.is_empty() {
        return Err(AuthError::EmptyToken);
    }
    store.set(Credential::new(access_token)).await?;
    tracing::info!("[AUTH] Login successful, credential cached");
    Ok(())
}

/// Drop the cached credential
pub async fn logout<S: CredentialStore>(store: &S) -> Result<(), AuthError> {
    store.clear().await?;
    tracing::info!("[AUTH] Logged out");
    Ok(())
}
