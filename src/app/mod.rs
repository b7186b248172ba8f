//! Client Module
//!
//! The client side of userdesk: configuration, the credential store, the
//! session-gated users client and login/logout.
//!
//! # Architecture
//!
//! - **`config`** - Configuration layering (defaults, settings file, environment)
//! - **`credential_store`** - Where the bearer token lives between runs
//! - **`client`** - `SessionGatedClient`, the authenticated users API
//! - **`auth`** - Login/logout and the OAuth consent URL
//! - **`main`** - `userdesk` command-line front-end (binary)
//!
//! # Example
//!
//! ```rust,no_run
//! use userdesk::app::{Config, FileCredentialStore, SessionGatedClient};
//! use userdesk::shared::ClientError;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load(None)?;
//! let store = FileCredentialStore::new(config.credentials_path());
//! let client = SessionGatedClient::new(config, store)?;
//!
//! match client.list_users(1).await {
//!     Ok(users) => println!("{} users", users.len()),
//!     Err(ClientError::AuthRequired) => println!("please log in"),
//!     Err(e) => println!("{}", e),
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod credential_store;
pub mod client;
pub mod auth;

// Re-export commonly used types
pub use config::Config;
pub use credential_store::{Credential, CredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use client::SessionGatedClient;
pub use auth::{login, logout, AuthError, AuthState, OAuthSettings};
