//! Color scheme preference.

use std::sync::Arc;

use kronos_core::Theme;
use tracing::{debug, warn};

use super::Observable;
use crate::error::StorageError;
use crate::storage::{ClientStorage, keys};

/// Applies the active theme to the rendering surface.
pub trait ThemeHook: Send + Sync {
    fn apply(&self, theme: Theme);
}

/// Hook for headless contexts with nothing to restyle.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopThemeHook;

impl ThemeHook for NoopThemeHook {
    fn apply(&self, _theme: Theme) {}
}

impl<F> ThemeHook for F
where
    F: Fn(Theme) + Send + Sync,
{
    fn apply(&self, theme: Theme) {
        self(theme);
    }
}

/// Light/dark state. Every change is persisted and handed to the hook.
#[derive(Clone)]
pub struct ThemeStore {
    storage: ClientStorage,
    hook: Arc<dyn ThemeHook>,
    theme: Observable<Theme>,
}

impl std::fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeStore")
            .field("theme", &self.current())
            .finish_non_exhaustive()
    }
}

impl ThemeStore {
    /// Initial theme: the persisted preference, else `os_preference`, else light.
    #[must_use]
    pub fn new(storage: ClientStorage, os_preference: Option<Theme>, hook: Arc<dyn ThemeHook>) -> Self {
        let persisted = storage
            .get(keys::THEME)
            .and_then(|value| value.parse::<Theme>().ok());
        let initial = persisted.or(os_preference).unwrap_or_default();
        debug!(theme = %initial, from_storage = persisted.is_some(), "Theme initialized");

        let store = Self {
            storage,
            hook,
            theme: Observable::new(initial),
        };
        store.mirror(initial);
        store
    }

    #[must_use]
    pub fn current(&self) -> Theme {
        self.theme.get()
    }

    #[must_use]
    pub const fn observable(&self) -> &Observable<Theme> {
        &self.theme
    }

    pub fn set(&self, theme: Theme) {
        self.theme.set(theme);
        self.mirror(theme);
    }

    /// Switch to the other theme and return it.
    pub fn toggle(&self) -> Theme {
        let next = self.current().toggled();
        self.set(next);
        next
    }

    fn mirror(&self, theme: Theme) {
        match self.storage.set(keys::THEME, theme.as_str()) {
            Ok(()) | Err(StorageError::Unavailable) => {}
            Err(e) => warn!(error = %e, "Failed to persist theme"),
        }
        self.hook.apply(theme);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    fn recording() -> (Arc<Mutex<Vec<Theme>>>, Arc<dyn ThemeHook>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let hook = move |theme: Theme| sink.lock().unwrap().push(theme);
        (seen, Arc::new(hook))
    }

    #[test]
    fn test_persisted_preference_wins() {
        let storage = ClientStorage::memory();
        storage.set(keys::THEME, "dark").unwrap();
        let store = ThemeStore::new(storage, Some(Theme::Light), Arc::new(NoopThemeHook));
        assert_eq!(store.current(), Theme::Dark);
    }

    #[test]
    fn test_os_preference_then_light() {
        let storage = ClientStorage::memory();
        storage.set(keys::THEME, "sepia").unwrap();
        let store = ThemeStore::new(storage, Some(Theme::Dark), Arc::new(NoopThemeHook));
        assert_eq!(store.current(), Theme::Dark);

        let store = ThemeStore::new(ClientStorage::memory(), None, Arc::new(NoopThemeHook));
        assert_eq!(store.current(), Theme::Light);
    }

    #[test]
    fn test_changes_are_persisted_and_hooked() {
        let storage = ClientStorage::memory();
        let (seen, hook) = recording();
        let store = ThemeStore::new(storage.clone(), None, hook);

        assert_eq!(store.toggle(), Theme::Dark);
        store.set(Theme::Light);

        assert_eq!(storage.get(keys::THEME).as_deref(), Some("light"));
        assert_eq!(*seen.lock().unwrap(), [Theme::Light, Theme::Dark, Theme::Light]);
    }
}
