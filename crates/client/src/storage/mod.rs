//! Persistent client-side key-value storage.
//!
//! Storage is an injected capability: a [`ClientStorage`] either wraps a
//! concrete [`Storage`] backend or is *detached*, in which case reads yield
//! nothing, removals do nothing, and writes fail with
//! [`StorageError::Unavailable`]. Headless contexts (server-side rendering,
//! one-shot tools) use the detached form.

mod file;
mod memory;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::StorageError;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Well-known storage slots.
pub mod keys {
    /// Bearer credential.
    pub const AUTH_TOKEN: &str = "auth_token";
    /// Persisted copy of the site configuration (JSON object).
    pub const SITE_CONFIG: &str = "kronostech_config";
    /// Recent search terms (JSON array of strings).
    pub const SEARCH_HISTORY: &str = "searchHistory";
    /// Color scheme preference (`light` or `dark`).
    pub const THEME: &str = "theme";
}

/// A string key-value store that survives restarts.
pub trait Storage: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Handle to the storage capability shared by the token store and the
/// persisted stores.
#[derive(Clone, Default)]
pub struct ClientStorage {
    backend: Option<Arc<dyn Storage>>,
}

impl std::fmt::Debug for ClientStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientStorage")
            .field("attached", &self.is_attached())
            .finish()
    }
}

impl ClientStorage {
    /// Wrap a storage backend.
    #[must_use]
    pub fn new(backend: impl Storage + 'static) -> Self {
        Self {
            backend: Some(Arc::new(backend)),
        }
    }

    /// Wrap an already shared storage backend.
    #[must_use]
    pub fn from_arc(backend: Arc<dyn Storage>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// Storage handle with no capability attached.
    #[must_use]
    pub const fn detached() -> Self {
        Self { backend: None }
    }

    /// Fresh in-memory storage.
    #[must_use]
    pub fn memory() -> Self {
        Self::new(MemoryStorage::default())
    }

    /// Whether a backend is attached.
    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.backend.is_some()
    }

    /// Read a raw value. Backend failures are logged and read as absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        let backend = self.backend.as_ref()?;
        match backend.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "Failed to read from storage");
                None
            }
        }
    }

    /// Read and decode a JSON value. Undecodable values are logged and read
    /// as absent.
    #[must_use]
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.get(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "Ignoring undecodable stored value");
                None
            }
        }
    }

    /// Write a raw value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` when detached, or the backend's
    /// error.
    pub fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.backend
            .as_ref()
            .ok_or(StorageError::Unavailable)?
            .set(key, value)
    }

    /// Encode `value` as JSON and write it.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if encoding fails, when detached, or on a
    /// backend failure.
    pub fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(value)?;
        self.set(key, &encoded)
    }

    /// Delete a value. No-op when detached; backend failures are logged.
    pub fn remove(&self, key: &str) {
        if let Some(backend) = &self.backend
            && let Err(e) = backend.remove(key)
        {
            warn!(key, error = %e, "Failed to remove from storage");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_detached_storage_is_inert() {
        let storage = ClientStorage::detached();
        assert!(!storage.is_attached());
        assert_eq!(storage.get(keys::THEME), None);
        assert!(matches!(
            storage.set(keys::THEME, "dark"),
            Err(StorageError::Unavailable)
        ));
        storage.remove(keys::THEME);
    }

    #[test]
    fn test_json_round_trip_through_memory() {
        let storage = ClientStorage::memory();
        storage
            .set_json(keys::SEARCH_HISTORY, &["laptop", "mouse"])
            .unwrap();
        let history: Vec<String> = storage.get_json(keys::SEARCH_HISTORY).unwrap();
        assert_eq!(history, vec!["laptop", "mouse"]);
    }

    #[test]
    fn test_undecodable_json_reads_as_absent() {
        let storage = ClientStorage::memory();
        storage.set(keys::SITE_CONFIG, "{not json").unwrap();
        assert!(storage.get_json::<serde_json::Value>(keys::SITE_CONFIG).is_none());
        assert_eq!(storage.get(keys::SITE_CONFIG).as_deref(), Some("{not json"));
    }

    #[test]
    fn test_clones_share_backend() {
        let storage = ClientStorage::memory();
        let other = storage.clone();
        storage.set(keys::AUTH_TOKEN, "abc").unwrap();
        assert_eq!(other.get(keys::AUTH_TOKEN).as_deref(), Some("abc"));
        other.remove(keys::AUTH_TOKEN);
        assert_eq!(storage.get(keys::AUTH_TOKEN), None);
    }
}
