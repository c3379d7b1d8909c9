//! Domain service modules, one per backend resource family.
//!
//! Each public operation builds a query or body, issues exactly one HTTP
//! call through [`ApiClient`](crate::http::ApiClient), and returns the
//! envelope's `data` or a [`ServiceError`](crate::error::ServiceError)
//! carrying the backend message (or the operation's default message).
//!
//! Services consumed by the reactive stores are also exposed as traits
//! ([`AuthApi`], [`CartApi`], [`ConfigApi`], [`LogsApi`]) so stores can be
//! driven by fakes in tests. The concrete `*Service` types are the single
//! default implementation.

pub mod account;
pub mod admin;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod logs;

pub use account::{AddressService, CouponService, PaymentMethodService, ProfileService, RefundService};
pub use admin::AdminService;
pub use auth::{AuthApi, AuthService};
pub use cart::{CartApi, CartService};
pub use catalog::CatalogService;
pub use checkout::{CheckoutService, normalize_coupon};
pub use config::{ConfigApi, ConfigService, DEFAULT_SESSION_TIMEOUT_HOURS, parse_config_value, stringify_config_value};
pub use logs::{LogsApi, LogsService};
