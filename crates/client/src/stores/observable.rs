//! Observable state cell shared between a store and its subscribers.

use std::sync::Arc;

use tokio::sync::watch;

/// A value that notifies subscribers on every change.
///
/// Clones share the same underlying state. Writers never block on readers;
/// subscribers see the latest value, intermediate values may be skipped.
#[derive(Debug)]
pub struct Observable<T> {
    tx: Arc<watch::Sender<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            tx: Arc::clone(&self.tx),
        }
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Observable<T> {
    #[must_use]
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    /// Borrow the current value.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.tx.borrow())
    }

    /// Replace the value and notify.
    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    /// Mutate in place and notify.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.tx.send_modify(f);
    }

    /// Mutate in place; notify only if `f` returns `true`.
    pub fn update_if(&self, f: impl FnOnce(&mut T) -> bool) -> bool {
        self.tx.send_if_modified(f)
    }

    /// Receiver that wakes on each change after this call.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

impl<T: Clone> Observable<T> {
    /// Snapshot of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_update() {
        let value = Observable::new(1);
        value.set(2);
        value.update(|v| *v += 3);
        assert_eq!(value.get(), 5);
        assert_eq!(value.with(|v| v * 2), 10);
    }

    #[test]
    fn test_clones_share_state() {
        let a = Observable::new(String::from("light"));
        let b = a.clone();
        b.set("dark".to_owned());
        assert_eq!(a.get(), "dark");
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let value = Observable::new(0);
        let mut rx = value.subscribe();

        value.set(7);
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), 7);

        assert!(!value.update_if(|_| false));
        assert!(!rx.has_changed().unwrap());
    }
}
