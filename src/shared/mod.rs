//! Shared Module
//!
//! Types shared by the client library and the command-line front-end:
//! the users wire format, error types and configuration.

/// Users collection wire types
pub mod user;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use user::{UserEnvelope, UserPage, UserRecord, UserUpdate};
pub use error::{ClientError, RequestFailure, StoreError};
pub use config::{AppConfig, AppConfigBuilder, ConfigError, DEFAULT_API_URL};
