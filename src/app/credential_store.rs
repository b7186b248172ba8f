//! Credential Store
//!
//! Holds the bearer token that gates every user operation.
//!
//! Two implementations are provided:
//!
//! - [`MemoryCredentialStore`] keeps the token in process memory. Useful for
//!   tests and for embedding the client where persistence is handled elsewhere.
//! - [`FileCredentialStore`] persists the token to a small TOML file so the
//!   session survives restarts:
//!
//! ```toml
//! token = "ya29.a0Af..."
//! saved_at = "2026-10-18T09:12:44Z"
//! ```
//!
//! Reading never fails: a missing, empty or unreadable file is an absent
//! credential. Only writes report errors.

use std::fmt;
use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;

use crate::shared::error::StoreError;

/// Opaque bearer token
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

impl From<String> for Credential {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Credential {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Storage cell for the current credential.
///
/// `set` and `clear` are idempotent.
pub trait CredentialStore: Send + Sync {
    /// Current credential, if any
    fn get(&self) -> impl Future<Output = Option<Credential>> + Send;

    /// Replace the stored credential
    fn set(&self, credential: Credential) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Remove the stored credential
    fn clear(&self) -> impl Future<Output = Result<(), StoreError>> + Send;
}

impl<S: CredentialStore> CredentialStore for Arc<S> {
    async fn get(&self) -> Option<Credential> {
        self.as_ref().get().await
    }

    async fn set(&self, credential: Credential) -> Result<(), StoreError> {
        self.as_ref().set(credential).await
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.as_ref().clear().await
    }
}

/// In-process credential cell
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    cell: RwLock<Option<Credential>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `credential`
    pub fn with_credential(credential: impl Into<Credential>) -> Self {
        Self {
            cell: RwLock::new(Some(credential.into())),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    async fn get(&self) -> Option<Credential> {
        self.cell.read().await.clone()
    }

    async fn set(&self, credential: Credential) -> Result<(), StoreError> {
        *self.cell.write().await = Some(credential);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        *self.cell.write().await = None;
        Ok(())
    }
}

/// On-disk layout of the credential file
#[derive(Debug, Serialize, Deserialize)]
struct StoredCredential {
    token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    saved_at: Option<DateTime<Utc>>,
}

/// Durable credential store backed by a TOML file
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/userdesk/credentials.toml`
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(std::env::temp_dir);
        path.push("userdesk");
        path.push("credentials.toml");
        path
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// When the stored credential was written, if recorded
    pub async fn saved_at(&self) -> Option<DateTime<Utc>> {
        self.read().await.and_then(|stored| stored.saved_at)
    }

    async fn read(&self) -> Option<StoredCredential> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("[STORE] Cannot read {}: {}", self.path.display(), e);
                return None;
            }
        };

        if content.trim().is_empty() {
            return None;
        }

        match toml::from_str::<StoredCredential>(&content) {
            Ok(stored) if !stored.token.is_empty() => Some(stored),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!("[STORE] Ignoring malformed {}: {}", self.path.display(), e);
                None
            }
        }
    }
}

impl CredentialStore for FileCredentialStore {
    async fn get(&self) -> Option<Credential> {
        self.read().await.map(|stored| Credential::new(stored.token))
    }

    async fn set(&self, credential: Credential) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let stored = StoredCredential {
            token: credential.into_inner(),
            saved_at: Some(Utc::now()),
        };
        let content = toml::to_string(&stored)?;

        // Staged as 0600 beside the target, then renamed over it.
        let staging = self.staging_path();
        let mut options = tokio::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);
        let mut file = options.open(&staging).await?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600)).await?;
        }

        file.write_all(content.as_bytes()).await?;
        file.sync_all().await?;
        drop(file);
        tokio::fs::rename(&staging, &self.path).await?;

        tracing::debug!("[STORE] Credential written to {}", self.path.display());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                tracing::debug!("[STORE] Credential removed from {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_token() {
        let credential = Credential::new("secret-token");
        let debug = format!("{:?}", credential);
        assert!(!debug.contains("secret-token"));
    }

    #[tokio::test]
    async fn test_memory_round_trip() {
        let store = MemoryCredentialStore::new();
        assert!(store.get().await.is_none());

        store.set(Credential::new("abc")).await.unwrap();
        assert_eq!(store.get().await, Some(Credential::new("abc")));

        store.set(Credential::new("def")).await.unwrap();
        assert_eq!(store.get().await, Some(Credential::new("def")));

        store.clear().await.unwrap();
        store.clear().await.unwrap();
        assert!(store.get().await.is_none());
    }

    #[tokio::test]
    async fn test_arc_store_shares_cell() {
        let store = Arc::new(MemoryCredentialStore::new());
        let other = Arc::clone(&store);

        store.set(Credential::new("shared")).await.unwrap();
        assert_eq!(other.get().await, Some(Credential::new("shared")));
    }

    #[tokio::test]
    async fn test_file_missing_reads_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("nope.toml"));
        assert!(store.get().await.is_none());
        assert!(store.clear().await.is_ok());
    }

    #[tokio::test]
    async fn test_file_malformed_reads_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.toml");
        std::fs::write(&path, "this is = = not toml").unwrap();

        let store = FileCredentialStore::new(&path);
        assert!(store.get().await.is_none());
    }

    #[tokio::test]
    async fn test_file_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("credentials.toml");
        let store = FileCredentialStore::new(&path);

        store.set(Credential::new("tok")).await.unwrap();
        assert!(path.exists());
        assert!(store.saved_at().await.is_some());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("token = \"tok\""));
        assert!(!store.staging_path().exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_file_overwrite_tightens_loose_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.toml");
        std::fs::write(&path, "token = \"old\"").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        let store = FileCredentialStore::new(&path);
        std::fs::write(store.staging_path(), "stale").unwrap();
        std::fs::set_permissions(store.staging_path(), std::fs::Permissions::from_mode(0o644)).unwrap();

        store.set(Credential::new("new")).await.unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(store.get().await, Some(Credential::new("new")));
        assert!(!store.staging_path().exists());
    }
}
