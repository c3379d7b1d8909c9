//! Application context: every service and store, wired once.

use std::sync::Arc;

use kronos_core::Theme;

use crate::config::ClientConfig;
use crate::http::ApiClient;
use crate::loaders::OrdersLoader;
use crate::services::{
    AddressService, AdminService, AuthService, CartService, CatalogService, CheckoutService, ConfigService,
    CouponService, LogsService, PaymentMethodService, ProfileService, RefundService,
};
use crate::storage::ClientStorage;
use crate::stores::{
    AddressStore, AuthStore, CartStore, LogsStore, NoopThemeHook, SearchHistoryStore, SiteConfigStore,
    ThemeHook, ThemeStore,
};
use crate::token::TokenStore;

/// Shared handle to the storefront client.
///
/// Cheaply cloneable; all clones share the same HTTP pool, storage, and
/// store state.
#[derive(Clone)]
pub struct Storefront {
    inner: Arc<StorefrontInner>,
}

struct StorefrontInner {
    api: ApiClient,

    auth: Arc<AuthService>,
    catalog: CatalogService,
    cart: Arc<CartService>,
    checkout: CheckoutService,
    addresses: AddressService,
    coupons: CouponService,
    refunds: RefundService,
    payment_methods: PaymentMethodService,
    profile: ProfileService,
    admin: AdminService,
    logs: Arc<LogsService>,
    config: Arc<ConfigService>,

    auth_store: AuthStore,
    cart_store: CartStore,
    site_config: SiteConfigStore,
    address_store: AddressStore,
    logs_store: LogsStore,
    search_history: SearchHistoryStore,
    theme: ThemeStore,

    orders: OrdersLoader,
}

impl std::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("api", &self.inner.api)
            .finish_non_exhaustive()
    }
}

impl Storefront {
    /// Context without a rendering surface to restyle.
    #[must_use]
    pub fn new(config: &ClientConfig, storage: ClientStorage) -> Self {
        Self::with_theme_hook(config, storage, None, Arc::new(NoopThemeHook))
    }

    /// Context whose theme store starts from `os_preference` when nothing is
    /// persisted and reports every change to `hook`.
    #[must_use]
    pub fn with_theme_hook(
        config: &ClientConfig,
        storage: ClientStorage,
        os_preference: Option<Theme>,
        hook: Arc<dyn ThemeHook>,
    ) -> Self {
        let tokens = TokenStore::new(storage.clone());
        let api = ApiClient::new(config, tokens);

        let auth = Arc::new(AuthService::new(api.clone()));
        let cart = Arc::new(CartService::new(api.clone()));
        let logs = Arc::new(LogsService::new(api.clone()));
        let config_service = Arc::new(ConfigService::new(api.clone()));

        let cart_store = CartStore::new(Arc::clone(&cart) as _);
        let auth_store = AuthStore::new(Arc::clone(&auth) as _, cart_store.clone());
        let site_config = SiteConfigStore::new(Arc::clone(&config_service) as _, storage.clone());
        let logs_store = LogsStore::new(Arc::clone(&logs) as _);
        let search_history = SearchHistoryStore::new(storage.clone());
        let theme = ThemeStore::new(storage, os_preference, hook);

        Self {
            inner: Arc::new(StorefrontInner {
                catalog: CatalogService::new(api.clone()),
                checkout: CheckoutService::new(api.clone()),
                addresses: AddressService::new(api.clone()),
                coupons: CouponService::new(api.clone()),
                refunds: RefundService::new(api.clone()),
                payment_methods: PaymentMethodService::new(api.clone()),
                profile: ProfileService::new(api.clone()),
                admin: AdminService::new(api.clone()),
                orders: OrdersLoader::new(api.clone()),
                api,
                auth,
                cart,
                logs,
                config: config_service,
                auth_store,
                cart_store,
                site_config,
                address_store: AddressStore::new(),
                logs_store,
                search_history,
                theme,
            }),
        }
    }

    /// Restore the persisted session and refresh the site configuration.
    pub async fn init(&self) {
        tokio::join!(self.inner.auth_store.init(), self.inner.site_config.load());
    }

    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    #[must_use]
    pub fn tokens(&self) -> &TokenStore {
        self.inner.api.tokens()
    }

    // ===== Services =====

    #[must_use]
    pub fn auth(&self) -> &AuthService {
        &self.inner.auth
    }

    #[must_use]
    pub fn catalog(&self) -> &CatalogService {
        &self.inner.catalog
    }

    #[must_use]
    pub fn cart(&self) -> &CartService {
        &self.inner.cart
    }

    #[must_use]
    pub fn checkout(&self) -> &CheckoutService {
        &self.inner.checkout
    }

    #[must_use]
    pub fn addresses(&self) -> &AddressService {
        &self.inner.addresses
    }

    #[must_use]
    pub fn coupons(&self) -> &CouponService {
        &self.inner.coupons
    }

    #[must_use]
    pub fn refunds(&self) -> &RefundService {
        &self.inner.refunds
    }

    #[must_use]
    pub fn payment_methods(&self) -> &PaymentMethodService {
        &self.inner.payment_methods
    }

    #[must_use]
    pub fn profile(&self) -> &ProfileService {
        &self.inner.profile
    }

    #[must_use]
    pub fn admin(&self) -> &AdminService {
        &self.inner.admin
    }

    #[must_use]
    pub fn logs(&self) -> &LogsService {
        &self.inner.logs
    }

    #[must_use]
    pub fn config(&self) -> &ConfigService {
        &self.inner.config
    }

    // ===== Stores =====

    #[must_use]
    pub fn auth_store(&self) -> &AuthStore {
        &self.inner.auth_store
    }

    #[must_use]
    pub fn cart_store(&self) -> &CartStore {
        &self.inner.cart_store
    }

    #[must_use]
    pub fn site_config(&self) -> &SiteConfigStore {
        &self.inner.site_config
    }

    #[must_use]
    pub fn address_store(&self) -> &AddressStore {
        &self.inner.address_store
    }

    #[must_use]
    pub fn logs_store(&self) -> &LogsStore {
        &self.inner.logs_store
    }

    #[must_use]
    pub fn search_history(&self) -> &SearchHistoryStore {
        &self.inner.search_history
    }

    #[must_use]
    pub fn theme(&self) -> &ThemeStore {
        &self.inner.theme
    }

    // ===== Loaders =====

    #[must_use]
    pub fn orders(&self) -> &OrdersLoader {
        &self.inner.orders
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stores_share_storage() {
        let storage = ClientStorage::memory();
        let app = Storefront::new(&ClientConfig::default(), storage.clone());

        app.search_history().add_search("teclado");
        app.tokens().set("abc");

        let reopened = Storefront::new(&ClientConfig::default(), storage);
        assert_eq!(reopened.search_history().history(), ["teclado"]);
        assert!(reopened.tokens().is_authenticated());
        assert_eq!(reopened.theme().current(), Theme::Light);
    }
}
