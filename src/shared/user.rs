/**
 * User Types
 *
 * Wire types for the remote users collection.
 */

use serde::{Deserialize, Serialize};

/// A user as served by the remote collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl UserRecord {
    /// "First Last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Partial update body for `PUT /users/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    pub first_name: String,
    pub last_name: String,
}

impl UserUpdate {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Update that keeps `current`'s value for any name left as `None`
    pub fn merged(current: &UserRecord, first_name: Option<String>, last_name: Option<String>) -> Self {
        Self {
            first_name: first_name.unwrap_or_else(|| current.first_name.clone()),
            last_name: last_name.unwrap_or_else(|| current.last_name.clone()),
        }
    }
}

/// One page of `GET /users?page={n}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub total_pages: u32,
    pub data: Vec<UserRecord>,
}

/// Single-record envelope of `GET /users/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEnvelope {
    pub data: UserRecord,
}
