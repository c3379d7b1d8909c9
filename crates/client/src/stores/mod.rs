//! Reactive state stores.
//!
//! Each store holds the latest known value of one domain concept in an
//! [`Observable`], updates it from service results, and exposes derived
//! read-only projections computed from the current value on demand.

mod addresses;
mod auth;
mod cart;
mod logs;
mod observable;
mod search_history;
mod site_config;
mod theme;

pub use addresses::{AddressState, AddressStore};
pub use auth::{AuthState, AuthStore};
pub use cart::{CartState, CartStore};
pub use logs::{LogStats, LogsState, LogsStore};
pub use observable::Observable;
pub use search_history::{MAX_SEARCH_HISTORY, SearchHistoryStore};
pub use site_config::{
    EcommerceSettings, FeatureFlags, SaveOutcome, ShippingSettings, SiteConfig, SiteConfigStore,
};
pub use theme::{NoopThemeHook, ThemeHook, ThemeStore};

#[cfg(test)]
pub(crate) mod testing {
    //! Fixtures shared by store tests.

    use chrono::{TimeZone, Utc};
    use kronos_core::{CartId, CartLineId, UserId, UserRole, VariantId};
    use rust_decimal::Decimal;

    use crate::models::{Cart, CartItem, User};

    /// Cart holding one line of `quantity` units at 10.00 each.
    pub fn sample_cart(quantity: i32) -> Cart {
        let unit_price = Decimal::new(1000, 2);
        let subtotal = unit_price * Decimal::from(quantity);
        let items = if quantity > 0 {
            vec![CartItem {
                id: CartLineId::new(11),
                variant_id: VariantId::new(5),
                product_id: None,
                name: "Mouse".to_owned(),
                sku: Some("M-1".to_owned()),
                image: None,
                unit_price,
                quantity,
                subtotal,
                stock: 50,
            }]
        } else {
            Vec::new()
        };
        Cart {
            id: CartId::new(3),
            user_id: Some(UserId::new(7)),
            items,
            item_count: quantity,
            subtotal,
            updated_at: Utc.with_ymd_and_hms(2025, 3, 1, 10, 0, 0).single().unwrap_or_default(),
        }
    }

    pub fn sample_user() -> User {
        User {
            id: UserId::new(7),
            first_name: "Ana".to_owned(),
            last_name: "Quispe".to_owned(),
            email: "ana@example.com".to_owned(),
            phone: None,
            dni: None,
            role: UserRole::Customer,
            email_verified: true,
            active: true,
            registered_at: "2025-01-10T09:00:00Z".to_owned(),
        }
    }
}
