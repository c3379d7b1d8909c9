//! Subcommand implementations.

pub mod cart;
pub mod config;
pub mod logs;
pub mod orders;
pub mod prefs;
pub mod session;
