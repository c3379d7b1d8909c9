//! Core types for KronosTech.
//!
//! This module provides type-safe wrappers for common domain concepts and
//! the response envelope convention used by the REST backend.

pub mod envelope;
pub mod id;
pub mod status;

pub use envelope::{ApiResponse, Page, Pagination};
pub use id::*;
pub use status::*;
