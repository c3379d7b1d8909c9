//! Wire models for the REST backend.
//!
//! Field names are English; `serde` attributes map them to the backend's
//! Spanish JSON keys.

mod account;
mod address;
mod admin;
mod auth;
mod cart;
mod catalog;
mod checkout;
mod config;
mod logs;

pub use account::{
    NewSavedPaymentMethod, Refund, RefundRequest, RefundRequestOutcome, SavedPaymentMethod,
    SavedPaymentMethodUpdate, UserCoupon,
};
pub use address::{Address, AddressUpdate, NewAddress};
pub use admin::{AdminUser, AdminUserUpdate, NewAdministrator, UserListParams};
pub use auth::{LoginData, LoginRequest, PasswordChange, ProfileUpdate, RegisterData, RegisterRequest, User};
pub use cart::{AddToCart, Cart, CartItem};
pub use catalog::{
    Brand, Category, Family, Product, ProductDetail, ProductFilters, ProductSummaryFields, Review,
    Subcategory,
};
pub use checkout::{CheckoutRequest, CheckoutTotals, Order, OrderLine, PaymentMethod};
pub use config::{ConfigEntry, ConfigMap, ConfigUpdate, ConfigValue};
pub use logs::{LogEntry, LogFilters, NewLogEntry};

pub(crate) use cart::QuantityUpdate;
pub(crate) use checkout::{OrderPage, TotalsQuery};
pub(crate) use config::ConfigBatch;
