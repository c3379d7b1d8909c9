//! Bearer credential storage.

use secrecy::SecretString;
use tracing::warn;

use crate::error::StorageError;
use crate::storage::{ClientStorage, keys};

/// Owns the session credential slot in persistent storage.
///
/// The token is opaque: nothing here inspects or validates it. Without an
/// attached storage capability every operation is a no-op and no token is
/// ever present.
#[derive(Debug, Clone)]
pub struct TokenStore {
    storage: ClientStorage,
}

impl TokenStore {
    /// Token store over `storage`.
    #[must_use]
    pub const fn new(storage: ClientStorage) -> Self {
        Self { storage }
    }

    /// Persist `token`, replacing any previous credential.
    pub fn set(&self, token: &str) {
        match self.storage.set(keys::AUTH_TOKEN, token) {
            Ok(()) | Err(StorageError::Unavailable) => {}
            Err(e) => warn!(error = %e, "Failed to persist auth token"),
        }
    }

    /// Current credential, if any.
    #[must_use]
    pub fn get(&self) -> Option<SecretString> {
        self.storage
            .get(keys::AUTH_TOKEN)
            .filter(|token| !token.is_empty())
            .map(SecretString::from)
    }

    /// Forget the credential.
    pub fn remove(&self) {
        self.storage.remove(keys::AUTH_TOKEN);
    }

    /// Whether a credential is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.get().is_some()
    }
}
