//! Kronos Core - Shared wire types.
//!
//! This crate provides the types shared by every KronosTech component:
//! - `client` - Typed REST client, reactive stores and page loaders
//! - `chat` - Locally hosted chat-assistant route
//! - `cli` - Operator command line over the client
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no storage.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Typed IDs, response envelopes and status enums

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
