//! Status enums for various entities.
//!
//! Wire values are the lowercase Spanish tags used by the backend; the Rust
//! variants carry English names.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a status tag is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind}: {value}")]
pub struct ParseStatusError {
    kind: &'static str,
    value: String,
}

impl ParseStatusError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

/// Severity of an audit log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    #[default]
    Info,
    Warning,
    Error,
    Success,
    Security,
}

impl LogLevel {
    /// Every level, in display order.
    pub const ALL: [Self; 5] = [
        Self::Info,
        Self::Success,
        Self::Warning,
        Self::Error,
        Self::Security,
    ];

    /// Wire tag for this level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Success => "success",
            Self::Security => "security",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LogLevel {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| ParseStatusError::new("log level", s))
    }
}

/// Color scheme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Persisted tag for this theme.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// The other theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Theme {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(ParseStatusError::new("theme", s)),
        }
    }
}

/// Account role with different permission levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum UserRole {
    /// Storefront shopper.
    #[default]
    #[serde(rename = "cliente")]
    Customer,
    /// Store management access.
    #[serde(rename = "administrador")]
    Admin,
    /// Full access including user management.
    #[serde(rename = "super_admin")]
    SuperAdmin,
}

impl UserRole {
    /// Wire tag for this role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "cliente",
            Self::Admin => "administrador",
            Self::SuperAdmin => "super_admin",
        }
    }

    /// Whether the role grants access to the administrative console.
    #[must_use]
    pub const fn is_staff(self) -> bool {
        matches!(self, Self::Admin | Self::SuperAdmin)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cliente" => Ok(Self::Customer),
            "administrador" => Ok(Self::Admin),
            "super_admin" => Ok(Self::SuperAdmin),
            _ => Err(ParseStatusError::new("user role", s)),
        }
    }
}

/// What an address may be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AddressKind {
    #[default]
    #[serde(rename = "envio")]
    Shipping,
    #[serde(rename = "facturacion")]
    Billing,
    #[serde(rename = "ambos")]
    Both,
}

/// Fulfillment state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    #[serde(rename = "pendiente")]
    Pending,
    #[serde(rename = "confirmado")]
    Confirmed,
    #[serde(rename = "procesando")]
    Processing,
    #[serde(rename = "enviado")]
    Shipped,
    #[serde(rename = "entregado")]
    Delivered,
    #[serde(rename = "cancelado")]
    Cancelled,
    #[serde(rename = "devuelto")]
    Returned,
}

/// Payment state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentStatus {
    #[default]
    #[serde(rename = "pendiente")]
    Pending,
    #[serde(rename = "procesando")]
    Processing,
    #[serde(rename = "completado")]
    Completed,
    #[serde(rename = "fallido")]
    Failed,
    #[serde(rename = "rechazado")]
    Rejected,
    #[serde(rename = "cancelado")]
    Cancelled,
    #[serde(rename = "reembolsado")]
    Refunded,
    // Some backend builds emit the debug-lowercased variant name.
    #[serde(rename = "parcialmente_reembolsado", alias = "parcialmentereembolsado")]
    PartiallyRefunded,
}

/// Scope of a refund request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RefundKind {
    #[serde(rename = "total")]
    Full,
    #[serde(rename = "parcial")]
    Partial,
}
