//! Audit log service.
//!
//! Audit logging must never break the caller's flow: every operation here
//! swallows failures, logs them with `warn!`, and returns a neutral value.

use async_trait::async_trait;
use kronos_core::LogLevel;
use tracing::{instrument, warn};

use crate::http::ApiClient;
use crate::models::{LogEntry, LogFilters, NewLogEntry};

const UNKNOWN_USER: &str = "Desconocido";
const SYSTEM_USER: &str = "Sistema";

/// Audit log operations the logs store depends on.
#[async_trait]
pub trait LogsApi: Send + Sync {
    /// Matching entries; empty on any failure.
    async fn list(&self, filters: &LogFilters) -> Vec<LogEntry>;

    /// The created entry, or `None` on any failure.
    async fn create(&self, entry: &NewLogEntry) -> Option<LogEntry>;

    /// Whether the backend confirmed the purge.
    async fn clear_all(&self) -> bool;
}

#[derive(Debug, Clone)]
pub struct LogsService {
    api: ApiClient,
}

impl LogsService {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    async fn record(
        &self,
        level: LogLevel,
        module: &str,
        action: &str,
        details: &str,
        user: Option<&str>,
    ) -> Option<LogEntry> {
        let entry = NewLogEntry {
            level,
            action: action.to_owned(),
            details: Some(details.to_owned()),
            module: module.to_owned(),
            user: user.map(str::to_owned),
        };
        self.create(&entry).await
    }

    // ===== Module helpers =====

    /// Authentication event: `success` level when it went through, `error` otherwise.
    pub async fn log_auth(&self, action: &str, details: &str, user: &str, success: bool) -> Option<LogEntry> {
        let level = if success { LogLevel::Success } else { LogLevel::Error };
        self.record(level, "Autenticación", action, details, Some(user)).await
    }

    /// Security event. Defaults to `warning` level and an unknown user.
    pub async fn log_security(
        &self,
        action: &str,
        details: &str,
        user: Option<&str>,
        level: Option<LogLevel>,
    ) -> Option<LogEntry> {
        self.record(
            level.unwrap_or(LogLevel::Warning),
            "Seguridad",
            action,
            details,
            Some(user.unwrap_or(UNKNOWN_USER)),
        )
        .await
    }

    /// User-management event. Defaults to `info` level.
    pub async fn log_user(
        &self,
        action: &str,
        details: &str,
        user: &str,
        level: Option<LogLevel>,
    ) -> Option<LogEntry> {
        self.record(level.unwrap_or(LogLevel::Info), "Usuarios", action, details, Some(user))
            .await
    }

    pub async fn log_config(&self, action: &str, details: &str, user: &str) -> Option<LogEntry> {
        self.record(LogLevel::Success, "Configuración", action, details, Some(user)).await
    }

    /// System event; the backend fills in the user. Defaults to `info` level.
    pub async fn log_system(&self, action: &str, details: &str, level: Option<LogLevel>) -> Option<LogEntry> {
        self.record(level.unwrap_or(LogLevel::Info), "Sistema", action, details, None)
            .await
    }

    /// Sale event. Defaults to `success` level, attributed to the system user.
    pub async fn log_sale(
        &self,
        action: &str,
        details: &str,
        user: Option<&str>,
        level: Option<LogLevel>,
    ) -> Option<LogEntry> {
        self.record(
            level.unwrap_or(LogLevel::Success),
            "Ventas",
            action,
            details,
            Some(user.unwrap_or(SYSTEM_USER)),
        )
        .await
    }

    /// Inventory event. Defaults to `info` level, attributed to the system user.
    pub async fn log_inventory(
        &self,
        action: &str,
        details: &str,
        user: Option<&str>,
        level: Option<LogLevel>,
    ) -> Option<LogEntry> {
        self.record(
            level.unwrap_or(LogLevel::Info),
            "Inventario",
            action,
            details,
            Some(user.unwrap_or(SYSTEM_USER)),
        )
        .await
    }

    pub async fn log_product(
        &self,
        action: &str,
        details: &str,
        user: &str,
        level: Option<LogLevel>,
    ) -> Option<LogEntry> {
        self.record(level.unwrap_or(LogLevel::Info), "Productos", action, details, Some(user))
            .await
    }
}

#[async_trait]
impl LogsApi for LogsService {
    #[instrument(skip(self))]
    async fn list(&self, filters: &LogFilters) -> Vec<LogEntry> {
        match self
            .api
            .get("/logs")
            .query(filters)
            .envelope("Error al obtener logs")
            .await
        {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "Failed to fetch audit log");
                Vec::new()
            }
        }
    }

    #[instrument(skip(self, entry), fields(level = %entry.level, module = %entry.module, action = %entry.action))]
    async fn create(&self, entry: &NewLogEntry) -> Option<LogEntry> {
        match self
            .api
            .post("/logs")
            .json(entry)
            .envelope("Error al crear log")
            .await
        {
            Ok(created) => Some(created),
            Err(e) => {
                warn!(error = %e, "Failed to record audit entry");
                None
            }
        }
    }

    #[instrument(skip(self))]
    async fn clear_all(&self) -> bool {
        match self
            .api
            .delete("/logs/limpiar")
            .acknowledge("Error al limpiar logs")
            .await
        {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Failed to clear audit log");
                false
            }
        }
    }
}
