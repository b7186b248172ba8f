//! userdesk - Main Library
//!
//! Authenticated user management against a demo REST API
//! (`https://reqres.in/api` by default). Login is delegated to an OAuth
//! provider; the access token it returns is cached locally and attached as a
//! bearer token to every request.
//!
//! # Module Structure
//!
//! - **`shared`** - Wire types, error types and configuration
//!   - `UserRecord`, `UserUpdate`, `UserPage`
//!   - `ClientError`, `RequestFailure`, `StoreError`
//!   - `AppConfig` and its builder
//!
//! - **`app`** - The client
//!   - `SessionGatedClient` for list/get/update/delete
//!   - `CredentialStore` with memory and file implementations
//!   - Login/logout helpers
//!
//! # Error Handling
//!
//! Every user operation returns `Result<T, ClientError>`:
//!
//! - `ClientError::AuthRequired` - no credential cached, nothing was sent
//! - `ClientError::RequestFailed` - transport error, non-2xx status or bad body
//!
//! Neither is fatal; callers send the user to login or report the failure.

/// Shared types and data structures
pub mod shared;

/// Client library
pub mod app;
