//! Cart store: mirrors the server cart snapshot.
//!
//! Every operation replaces the snapshot wholesale with the server's answer.
//! Operations are numbered when issued; a response is applied only if no
//! later-issued operation has been applied already, so overlapping
//! mutations cannot resurrect a stale cart.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use kronos_core::{CartLineId, VariantId};
use rust_decimal::Decimal;
use tracing::debug;

use super::Observable;
use crate::error::ServiceError;
use crate::models::{AddToCart, Cart, CartItem};
use crate::services::CartApi;

/// Observable cart state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartState {
    /// Payload of the most recent applied successful operation.
    pub cart: Option<Cart>,
    /// Message of the most recent applied failure.
    pub error: Option<String>,
    pending: usize,
    applied: u64,
}

impl CartState {
    /// Whether any cart request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.pending > 0
    }

    #[must_use]
    pub fn item_count(&self) -> i32 {
        self.cart.as_ref().map_or(0, |c| c.item_count)
    }

    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.cart.as_ref().map_or(Decimal::ZERO, |c| c.subtotal)
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        self.cart.as_ref().map(|c| c.items.as_slice()).unwrap_or_default()
    }
}

#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

struct CartStoreInner {
    api: Arc<dyn CartApi>,
    state: Observable<CartState>,
    issued: AtomicU64,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("state", &self.inner.state)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    #[must_use]
    pub fn new(api: Arc<dyn CartApi>) -> Self {
        Self {
            inner: Arc::new(CartStoreInner {
                api,
                state: Observable::default(),
                issued: AtomicU64::new(0),
            }),
        }
    }

    /// Observable state for subscribers.
    #[must_use]
    pub fn state(&self) -> &Observable<CartState> {
        &self.inner.state
    }

    #[must_use]
    pub fn cart(&self) -> Option<Cart> {
        self.inner.state.with(|s| s.cart.clone())
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.inner.state.with(|s| s.error.clone())
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.inner.state.with(CartState::is_loading)
    }

    #[must_use]
    pub fn item_count(&self) -> i32 {
        self.inner.state.with(CartState::item_count)
    }

    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.inner.state.with(CartState::subtotal)
    }

    #[must_use]
    pub fn items(&self) -> Vec<CartItem> {
        self.inner.state.with(|s| s.items().to_vec())
    }

    // ===== Operations =====

    /// # Errors
    ///
    /// Returns the service error after recording its message in the store.
    pub async fn fetch_cart(&self) -> Result<Cart, ServiceError> {
        self.run(self.inner.api.get()).await
    }

    /// # Errors
    ///
    /// Returns the service error after recording its message in the store.
    pub async fn add_item(&self, variant_id: VariantId, quantity: i32) -> Result<Cart, ServiceError> {
        let item = AddToCart { variant_id, quantity };
        self.run(self.inner.api.add_item(item)).await
    }

    /// # Errors
    ///
    /// Returns the service error after recording its message in the store.
    pub async fn update_quantity(&self, line: CartLineId, quantity: i32) -> Result<Cart, ServiceError> {
        self.run(self.inner.api.update_quantity(line, quantity)).await
    }

    /// # Errors
    ///
    /// Returns the service error after recording its message in the store.
    pub async fn remove_item(&self, line: CartLineId) -> Result<Cart, ServiceError> {
        self.run(self.inner.api.remove_item(line)).await
    }

    /// # Errors
    ///
    /// Returns the service error after recording its message in the store.
    pub async fn clear_cart(&self) -> Result<Cart, ServiceError> {
        self.run(self.inner.api.clear()).await
    }

    /// Load the cart for a fresh session. Any failure means "no cart yet"
    /// and leaves the store empty.
    pub async fn init_cart(&self) {
        let (seq, result) = self.run_numbered(self.inner.api.get()).await;
        if let Err(e) = result {
            debug!(error = %e, "No cart available, starting empty");
            self.inner.state.update(|s| {
                if s.applied == seq {
                    s.cart = None;
                    s.error = None;
                }
            });
        }
    }

    /// Reset to empty. Responses to operations issued before this call are
    /// discarded when they arrive.
    pub fn clear_store(&self) {
        let barrier = self.inner.issued.load(Ordering::SeqCst);
        self.inner.state.update(|s| {
            s.cart = None;
            s.error = None;
            s.applied = s.applied.max(barrier);
        });
    }

    async fn run<F>(&self, operation: F) -> Result<Cart, ServiceError>
    where
        F: Future<Output = Result<Cart, ServiceError>>,
    {
        self.run_numbered(operation).await.1
    }

    /// Like `run`, also returning the sequence number the operation was
    /// issued under.
    async fn run_numbered<F>(&self, operation: F) -> (u64, Result<Cart, ServiceError>)
    where
        F: Future<Output = Result<Cart, ServiceError>>,
    {
        let seq = self.inner.issued.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.state.update(|s| s.pending += 1);

        let result = operation.await;

        self.inner.state.update(|s| {
            s.pending = s.pending.saturating_sub(1);
            if seq <= s.applied {
                debug!(seq, applied = s.applied, "Discarding stale cart response");
                return;
            }
            s.applied = seq;
            match &result {
                Ok(cart) => {
                    s.cart = Some(cart.clone());
                    s.error = None;
                }
                Err(e) => s.error = Some(e.message().to_owned()),
            }
        });

        (seq, result)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use reqwest::StatusCode;
    use tokio::sync::{mpsc, oneshot};

    use super::*;
    use crate::stores::testing::sample_cart;

    /// Cart backend whose answers are scripted per call.
    #[derive(Default)]
    struct ScriptedCart {
        get: Mutex<Option<Result<Cart, ServiceError>>>,
        add: Mutex<Option<Result<Cart, ServiceError>>>,
    }

    fn rejected(message: &str) -> ServiceError {
        ServiceError::rejected(StatusCode::BAD_REQUEST, Some(message.to_owned()), "Error")
    }

    fn take(slot: &Mutex<Option<Result<Cart, ServiceError>>>) -> Result<Cart, ServiceError> {
        slot.lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Err(rejected("unscripted")))
    }

    #[async_trait]
    impl CartApi for ScriptedCart {
        async fn get(&self) -> Result<Cart, ServiceError> {
            take(&self.get)
        }
        async fn add_item(&self, _item: AddToCart) -> Result<Cart, ServiceError> {
            take(&self.add)
        }
        async fn update_quantity(&self, _line: CartLineId, _quantity: i32) -> Result<Cart, ServiceError> {
            Err(rejected("unscripted"))
        }
        async fn remove_item(&self, _line: CartLineId) -> Result<Cart, ServiceError> {
            Err(rejected("unscripted"))
        }
        async fn clear(&self) -> Result<Cart, ServiceError> {
            Ok(sample_cart(0))
        }
    }

    #[tokio::test]
    async fn test_success_replaces_snapshot_exactly() {
        let api = ScriptedCart::default();
        *api.add.lock().unwrap() = Some(Ok(sample_cart(3)));
        let store = CartStore::new(Arc::new(api));

        let cart = store.add_item(VariantId::new(5), 3).await.unwrap();

        assert_eq!(store.cart(), Some(cart));
        assert_eq!(store.item_count(), 3);
        assert_eq!(store.error(), None);
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_failure_keeps_snapshot_and_records_message() {
        let api = ScriptedCart::default();
        *api.get.lock().unwrap() = Some(Ok(sample_cart(2)));
        *api.add.lock().unwrap() = Some(Err(rejected("Stock insuficiente")));
        let store = CartStore::new(Arc::new(api));

        store.fetch_cart().await.unwrap();
        let before = store.cart();
        let err = store.add_item(VariantId::new(5), 99).await.unwrap_err();

        assert_eq!(err.message(), "Stock insuficiente");
        assert_eq!(store.cart(), before);
        assert_eq!(store.error().as_deref(), Some("Stock insuficiente"));
    }

    #[tokio::test]
    async fn test_success_after_failure_clears_error() {
        let api = ScriptedCart::default();
        *api.add.lock().unwrap() = Some(Err(rejected("Stock insuficiente")));
        let store = CartStore::new(Arc::new(api));

        let _ = store.add_item(VariantId::new(5), 99).await;
        store.clear_cart().await.unwrap();

        assert_eq!(store.error(), None);
        assert_eq!(store.item_count(), 0);
    }

    #[tokio::test]
    async fn test_init_cart_failure_leaves_store_empty() {
        let api = ScriptedCart::default();
        *api.get.lock().unwrap() = Some(Err(rejected("Token no proporcionado")));
        let store = CartStore::new(Arc::new(api));

        store.init_cart().await;

        assert_eq!(store.state().get(), CartState {
            applied: 1,
            ..CartState::default()
        });
        assert_eq!(store.subtotal(), Decimal::ZERO);
        assert!(store.items().is_empty());
    }

    /// Cart backend that holds each quantity update until released.
    struct GatedCart {
        gates: Mutex<HashMap<i32, oneshot::Receiver<()>>>,
        started: mpsc::UnboundedSender<i32>,
    }

    #[async_trait]
    impl CartApi for GatedCart {
        async fn get(&self) -> Result<Cart, ServiceError> {
            Ok(sample_cart(0))
        }
        async fn add_item(&self, item: AddToCart) -> Result<Cart, ServiceError> {
            Ok(sample_cart(item.quantity))
        }
        async fn update_quantity(&self, _line: CartLineId, quantity: i32) -> Result<Cart, ServiceError> {
            let gate = self.gates.lock().unwrap().remove(&quantity);
            self.started.send(quantity).unwrap();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            Ok(sample_cart(quantity))
        }
        async fn remove_item(&self, _line: CartLineId) -> Result<Cart, ServiceError> {
            Ok(sample_cart(0))
        }
        async fn clear(&self) -> Result<Cart, ServiceError> {
            Ok(sample_cart(0))
        }
    }

    fn gated() -> (CartStore, HashMap<i32, oneshot::Sender<()>>, mpsc::UnboundedReceiver<i32>) {
        let (started_tx, started_rx) = mpsc::unbounded_channel();
        let mut gates = HashMap::new();
        let mut releases = HashMap::new();
        for quantity in [1, 2] {
            let (tx, rx) = oneshot::channel();
            gates.insert(quantity, rx);
            releases.insert(quantity, tx);
        }
        let api = GatedCart {
            gates: Mutex::new(gates),
            started: started_tx,
        };
        (CartStore::new(Arc::new(api)), releases, started_rx)
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let (store, mut releases, mut started) = gated();
        let line = CartLineId::new(11);

        let first = tokio::spawn({
            let store = store.clone();
            async move { store.update_quantity(line, 1).await }
        });
        assert_eq!(started.recv().await, Some(1));
        let second = tokio::spawn({
            let store = store.clone();
            async move { store.update_quantity(line, 2).await }
        });
        assert_eq!(started.recv().await, Some(2));
        assert!(store.is_loading());

        releases.remove(&2).unwrap().send(()).unwrap();
        second.await.unwrap().unwrap();
        releases.remove(&1).unwrap().send(()).unwrap();
        first.await.unwrap().unwrap();

        assert_eq!(store.item_count(), 2);
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_clear_store_discards_in_flight_responses() {
        let (store, mut releases, mut started) = gated();

        let pending = tokio::spawn({
            let store = store.clone();
            async move { store.update_quantity(CartLineId::new(11), 1).await }
        });
        assert_eq!(started.recv().await, Some(1));

        store.clear_store();
        releases.remove(&1).unwrap().send(()).unwrap();
        pending.await.unwrap().unwrap();

        assert_eq!(store.cart(), None);
    }

    /// Cart backend whose initial fetch fails once released.
    struct FailingFetch {
        gate: Mutex<Option<oneshot::Receiver<()>>>,
        started: mpsc::UnboundedSender<()>,
    }

    #[async_trait]
    impl CartApi for FailingFetch {
        async fn get(&self) -> Result<Cart, ServiceError> {
            let gate = self.gate.lock().unwrap().take();
            self.started.send(()).unwrap();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            Err(rejected("Token no proporcionado"))
        }
        async fn add_item(&self, item: AddToCart) -> Result<Cart, ServiceError> {
            Ok(sample_cart(item.quantity))
        }
        async fn update_quantity(&self, _line: CartLineId, _quantity: i32) -> Result<Cart, ServiceError> {
            Err(rejected("unscripted"))
        }
        async fn remove_item(&self, _line: CartLineId) -> Result<Cart, ServiceError> {
            Err(rejected("unscripted"))
        }
        async fn clear(&self) -> Result<Cart, ServiceError> {
            Ok(sample_cart(0))
        }
    }

    #[tokio::test]
    async fn test_stale_init_failure_keeps_newer_cart() {
        let (release, gate) = oneshot::channel();
        let (started_tx, mut started) = mpsc::unbounded_channel();
        let store = CartStore::new(Arc::new(FailingFetch {
            gate: Mutex::new(Some(gate)),
            started: started_tx,
        }));

        let init = tokio::spawn({
            let store = store.clone();
            async move { store.init_cart().await }
        });
        assert_eq!(started.recv().await, Some(()));

        let added = store.add_item(VariantId::new(5), 3).await.unwrap();
        release.send(()).unwrap();
        init.await.unwrap();

        assert_eq!(store.cart(), Some(added));
        assert_eq!(store.item_count(), 3);
        assert_eq!(store.error(), None);
    }
}
