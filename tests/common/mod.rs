//! Common test utilities and helpers
//!
//! - Mock users API built on wiremock
//! - Client constructors wired to in-memory or temp-file stores
//! - Custom assertion macros

#![allow(dead_code)]

pub mod assertions;
pub mod mock_server;

pub use mock_server::*;
