//! Auth store: the current user and session lifecycle.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::{CartStore, Observable};
use crate::error::ServiceError;
use crate::models::{LoginRequest, User};
use crate::services::AuthApi;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
    pub error: Option<String>,
}

impl AuthState {
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Session state shared across the application.
///
/// Logging in or restoring a session initializes the cart store; logging
/// out clears it.
#[derive(Clone)]
pub struct AuthStore {
    inner: Arc<AuthStoreInner>,
}

struct AuthStoreInner {
    api: Arc<dyn AuthApi>,
    cart: CartStore,
    state: Observable<AuthState>,
}

impl std::fmt::Debug for AuthStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthStore")
            .field("state", &self.inner.state)
            .finish_non_exhaustive()
    }
}

impl AuthStore {
    #[must_use]
    pub fn new(api: Arc<dyn AuthApi>, cart: CartStore) -> Self {
        Self {
            inner: Arc::new(AuthStoreInner {
                api,
                cart,
                state: Observable::default(),
            }),
        }
    }

    #[must_use]
    pub fn state(&self) -> &Observable<AuthState> {
        &self.inner.state
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.inner.state.with(|s| s.user.clone())
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.inner.state.with(|s| s.error.clone())
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.inner.state.with(|s| s.loading)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.state.with(AuthState::is_authenticated)
    }

    /// Replace the current user and clear any error.
    pub fn set_user(&self, user: Option<User>) {
        self.inner.state.update(|s| {
            s.user = user;
            s.error = None;
        });
    }

    /// Restore a persisted session. Does nothing without a stored token.
    #[instrument(skip(self))]
    pub async fn init(&self) {
        if !self.inner.api.has_token() {
            debug!("No stored token, staying anonymous");
            return;
        }

        self.set_loading(true);
        match self.inner.api.current_user().await {
            Ok(user) => {
                info!(user_id = %user.id, "Session restored");
                self.set_user(Some(user));
                self.inner.cart.init_cart().await;
            }
            Err(e) => self.fail(&e),
        }
        self.set_loading(false);
    }

    /// Log in, then load the user's cart.
    ///
    /// # Errors
    ///
    /// Returns the service error after recording its message in the store.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: &LoginRequest) -> Result<User, ServiceError> {
        self.set_loading(true);
        let result = self.inner.api.login(request).await;
        let outcome = match result {
            Ok(data) => {
                self.set_user(Some(data.user.clone()));
                self.inner.cart.init_cart().await;
                Ok(data.user)
            }
            Err(e) => {
                self.inner.state.update(|s| s.error = Some(e.message().to_owned()));
                Err(e)
            }
        };
        self.set_loading(false);
        outcome
    }

    /// Re-run the identity check for the stored token.
    ///
    /// # Errors
    ///
    /// Returns the service error; the user is cleared and the token
    /// forgotten.
    pub async fn refresh(&self) -> Result<User, ServiceError> {
        self.set_loading(true);
        let result = self.inner.api.current_user().await;
        match &result {
            Ok(user) => self.set_user(Some(user.clone())),
            Err(e) => self.fail(e),
        }
        self.set_loading(false);
        result
    }

    /// End the session. The user and the cart store are cleared even if the
    /// backend call fails.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        self.set_loading(true);
        self.inner.api.logout().await;
        self.set_user(None);
        self.inner.cart.clear_store();
        self.set_loading(false);
        info!("Logged out");
    }

    fn set_loading(&self, loading: bool) {
        self.inner.state.update(|s| s.loading = loading);
    }

    fn fail(&self, error: &ServiceError) {
        debug!(error = %error, "Identity check failed");
        self.inner.state.update(|s| {
            s.user = None;
            s.error = Some(error.message().to_owned());
        });
    }
}
