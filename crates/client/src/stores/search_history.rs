//! Recent search terms, persisted across sessions.

use tracing::warn;

use super::Observable;
use crate::error::StorageError;
use crate::storage::{ClientStorage, keys};

/// Maximum number of remembered terms.
pub const MAX_SEARCH_HISTORY: usize = 10;

/// Most-recent-first list of distinct search terms.
#[derive(Debug, Clone)]
pub struct SearchHistoryStore {
    storage: ClientStorage,
    history: Observable<Vec<String>>,
}

impl SearchHistoryStore {
    /// Store seeded from the persisted list.
    #[must_use]
    pub fn new(storage: ClientStorage) -> Self {
        let initial: Vec<String> = storage.get_json(keys::SEARCH_HISTORY).unwrap_or_default();
        Self {
            storage,
            history: Observable::new(initial),
        }
    }

    #[must_use]
    pub const fn observable(&self) -> &Observable<Vec<String>> {
        &self.history
    }

    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.history.get()
    }

    /// Move `term` to the front. Blank terms are ignored.
    pub fn add_search(&self, term: &str) {
        if term.trim().is_empty() {
            return;
        }

        self.history.update(|history| {
            history.retain(|t| t != term);
            history.insert(0, term.to_owned());
            history.truncate(MAX_SEARCH_HISTORY);
        });

        let snapshot = self.history.get();
        match self.storage.set_json(keys::SEARCH_HISTORY, &snapshot) {
            Ok(()) | Err(StorageError::Unavailable) => {}
            Err(e) => warn!(error = %e, "Failed to persist search history"),
        }
    }

    pub fn clear_history(&self) {
        self.history.set(Vec::new());
        self.storage.remove(keys::SEARCH_HISTORY);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_term_is_deduplicated() {
        let store = SearchHistoryStore::new(ClientStorage::memory());
        store.add_search("phone");
        store.add_search("phone");
        assert_eq!(store.history(), ["phone"]);
    }

    #[test]
    fn test_most_recent_first_and_capped() {
        let store = SearchHistoryStore::new(ClientStorage::memory());
        for i in 0..12 {
            store.add_search(&format!("term {i}"));
        }
        store.add_search("term 5");

        let history = store.history();
        assert_eq!(history.len(), MAX_SEARCH_HISTORY);
        assert_eq!(history[0], "term 5");
        assert_eq!(history[1], "term 11");
        assert!(!history.contains(&"term 0".to_owned()));
    }

    #[test]
    fn test_blank_terms_are_ignored() {
        let store = SearchHistoryStore::new(ClientStorage::memory());
        store.add_search("   ");
        store.add_search("");
        assert!(store.history().is_empty());
    }

    #[test]
    fn test_history_survives_restart_and_clear_removes_it() {
        let storage = ClientStorage::memory();
        SearchHistoryStore::new(storage.clone()).add_search("laptop");

        let reopened = SearchHistoryStore::new(storage.clone());
        assert_eq!(reopened.history(), ["laptop"]);

        reopened.clear_history();
        assert!(reopened.history().is_empty());
        assert_eq!(storage.get(keys::SEARCH_HISTORY), None);
    }

    #[test]
    fn test_detached_storage_still_tracks_in_memory() {
        let store = SearchHistoryStore::new(ClientStorage::detached());
        store.add_search("monitor");
        assert_eq!(store.history(), ["monitor"]);
    }
}
