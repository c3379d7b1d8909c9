//! KronosTech storefront client.
//!
//! Everything the storefront UI needs to talk to the KronosTech REST backend:
//!
//! - [`TokenStore`] and [`ApiClient`]: bearer token persistence and the
//!   shared HTTP wrapper (envelope unwrapping, 401 handling)
//! - [`services`]: one typed service per backend area
//! - [`stores`]: observable state (session, cart, theme, site config, ...)
//! - [`loaders`]: per-page data fetchers that never fail
//! - [`Storefront`]: the wired application context

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod config;
pub mod error;
pub mod http;
pub mod loaders;
pub mod models;
pub mod services;
pub mod storage;
pub mod stores;
pub mod token;

pub use app::Storefront;
pub use config::{ClientConfig, ConfigError};
pub use error::{ServiceError, StorageError};
pub use http::{ApiClient, ApiRequest};
pub use storage::{ClientStorage, FileStorage, MemoryStorage, Storage};
pub use token::TokenStore;
