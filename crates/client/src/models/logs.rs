//! Audit log types.

use kronos_core::LogLevel;
use serde::{Deserialize, Serialize};

/// Audit record as returned by `GET /logs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: String,
    pub timestamp: String,
    pub level: LogLevel,
    pub action: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub details: String,
    pub module: String,
}

/// Body for `POST /logs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewLogEntry {
    #[serde(rename = "nivel")]
    pub level: LogLevel,
    #[serde(rename = "accion")]
    pub action: String,
    #[serde(rename = "detalles", skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(rename = "modulo")]
    pub module: String,
    #[serde(rename = "email_usuario", skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

/// Filters for `GET /logs`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LogFilters {
    #[serde(rename = "nivel", skip_serializing_if = "Option::is_none")]
    pub level: Option<LogLevel>,
    #[serde(rename = "modulo", skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    #[serde(rename = "fecha_inicio", skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(rename = "fecha_fin", skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl LogFilters {
    /// Only a page size.
    #[must_use]
    pub fn limit(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }
}
