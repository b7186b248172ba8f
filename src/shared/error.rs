//! Shared Error Types
//!
//! Error types returned by the session-gated client and the credential store.
//!
//! # Error Categories
//!
//! - `ClientError` - outcome of a gated operation that did not succeed
//! - `RequestFailure` - why a request was abandoned (transport, status, decode)
//! - `StoreError` - the credential store could not be written
//!
//! # Usage
//!
//! ```rust
//! use userdesk::shared::error::{ClientError, RequestFailure};
//!
//! let error = ClientError::from(RequestFailure::status(404, "not found"));
//! assert!(error.is_request_failed());
//! ```
use thiserror::Error;

/// Outcome of a gated operation that did not produce a value
#[derive(Debug, Error)]
pub enum ClientError {
    /// No credential is cached; the caller should send the user to login.
    /// No request was issued.
    #[error("authentication required")]
    AuthRequired,

    /// The request was issued but did not succeed
    #[error("request failed: {0}")]
    RequestFailed(#[from] RequestFailure),
}

impl ClientError {
    pub fn is_auth_required(&self) -> bool {
        matches!(self, Self::AuthRequired)
    }

    pub fn is_request_failed(&self) -> bool {
        matches!(self, Self::RequestFailed(_))
    }
}

/// Detail carried by [`ClientError::RequestFailed`]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestFailure {
    /// Connection, TLS or timeout error before a status was received
    #[error("network error: {0}")]
    Transport(String),

    /// The server answered with a non-success status
    #[error("server responded {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, possibly empty
        body: String,
    },

    /// The body of a success response could not be decoded
    #[error("failed to parse response: {0}")]
    Decode(String),
}

impl RequestFailure {
    /// Create a new status failure
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// HTTP status, when the server answered
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RequestFailure {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Credential store write failures
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("credential store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize credential: {0}")]
    Serialize(#[from] toml::ser::Error),
}
