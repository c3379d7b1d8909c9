//! Audit log store for the administration console.

use std::cmp::Reverse;
use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime};
use kronos_core::LogLevel;
use tracing::instrument;

use super::Observable;
use crate::models::{LogEntry, LogFilters, NewLogEntry};
use crate::services::LogsApi;

/// Page size used by [`LogsStore::refresh`].
const REFRESH_LIMIT: u32 = 500;
const SYSTEM_USER: &str = "Sistema";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogsState {
    pub entries: Vec<LogEntry>,
    pub loading: bool,
}

/// Entry counts per level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogStats {
    pub total: usize,
    pub info: usize,
    pub success: usize,
    pub warning: usize,
    pub error: usize,
    pub security: usize,
}

impl LogStats {
    #[must_use]
    pub fn from_entries(entries: &[LogEntry]) -> Self {
        entries.iter().fold(
            Self {
                total: entries.len(),
                ..Self::default()
            },
            |mut stats, entry| {
                match entry.level {
                    LogLevel::Info => stats.info += 1,
                    LogLevel::Success => stats.success += 1,
                    LogLevel::Warning => stats.warning += 1,
                    LogLevel::Error => stats.error += 1,
                    LogLevel::Security => stats.security += 1,
                }
                stats
            },
        )
    }
}

#[derive(Clone)]
pub struct LogsStore {
    api: Arc<dyn LogsApi>,
    state: Observable<LogsState>,
}

impl std::fmt::Debug for LogsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogsStore")
            .field("entries", &self.state.with(|s| s.entries.len()))
            .finish_non_exhaustive()
    }
}

impl LogsStore {
    #[must_use]
    pub fn new(api: Arc<dyn LogsApi>) -> Self {
        Self {
            api,
            state: Observable::default(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &Observable<LogsState> {
        &self.state
    }

    #[must_use]
    pub fn entries(&self) -> Vec<LogEntry> {
        self.state.with(|s| s.entries.clone())
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.with(|s| s.loading)
    }

    /// Replace the entries with the backend's answer for `filters`.
    #[instrument(skip(self))]
    pub async fn load(&self, filters: &LogFilters) {
        self.state.update(|s| s.loading = true);
        let entries = self.api.list(filters).await;
        self.state.update(|s| {
            s.entries = entries;
            s.loading = false;
        });
    }

    /// Reload the most recent entries.
    pub async fn refresh(&self) {
        self.load(&LogFilters::limit(REFRESH_LIMIT)).await;
    }

    /// Record an entry; on success it is prepended to the list.
    pub async fn add(&self, entry: &NewLogEntry) -> Option<LogEntry> {
        let created = self.api.create(entry).await?;
        self.state.update(|s| s.entries.insert(0, created.clone()));
        Some(created)
    }

    pub async fn info(&self, action: &str, details: &str, module: &str, user: Option<&str>) -> Option<LogEntry> {
        self.add(&entry(LogLevel::Info, action, details, module, user)).await
    }

    pub async fn success(&self, action: &str, details: &str, module: &str, user: Option<&str>) -> Option<LogEntry> {
        self.add(&entry(LogLevel::Success, action, details, module, user)).await
    }

    pub async fn warning(&self, action: &str, details: &str, module: &str, user: Option<&str>) -> Option<LogEntry> {
        self.add(&entry(LogLevel::Warning, action, details, module, user)).await
    }

    pub async fn error(&self, action: &str, details: &str, module: &str, user: Option<&str>) -> Option<LogEntry> {
        self.add(&entry(LogLevel::Error, action, details, module, user)).await
    }

    /// Purge the audit log. The local list is emptied only if the backend
    /// confirmed.
    #[instrument(skip(self))]
    pub async fn clear(&self) -> bool {
        self.state.update(|s| s.loading = true);
        let cleared = self.api.clear_all().await;
        self.state.update(|s| {
            if cleared {
                s.entries.clear();
            }
            s.loading = false;
        });
        cleared
    }

    // ===== Projections =====

    #[must_use]
    pub fn stats(&self) -> LogStats {
        self.state.with(|s| LogStats::from_entries(&s.entries))
    }

    /// Entries newest first.
    #[must_use]
    pub fn sorted(&self) -> Vec<LogEntry> {
        let mut entries = self.entries();
        entries.sort_by_cached_key(|e| Reverse((parse_timestamp(&e.timestamp), e.timestamp.clone())));
        entries
    }

    /// Distinct module names, alphabetically.
    #[must_use]
    pub fn modules(&self) -> Vec<String> {
        self.state.with(|s| {
            s.entries
                .iter()
                .map(|e| e.module.clone())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect()
        })
    }
}

fn entry(level: LogLevel, action: &str, details: &str, module: &str, user: Option<&str>) -> NewLogEntry {
    NewLogEntry {
        level,
        action: action.to_owned(),
        details: Some(details.to_owned()),
        module: module.to_owned(),
        user: Some(user.unwrap_or(SYSTEM_USER).to_owned()),
    }
}

/// Backend timestamps are naive ISO-8601, sometimes with an offset.
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_utc())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;

    use super::*;

    fn log(id: &str, level: LogLevel, module: &str, timestamp: &str) -> LogEntry {
        LogEntry {
            id: id.to_owned(),
            timestamp: timestamp.to_owned(),
            level,
            action: "Acción".to_owned(),
            user: "admin@kronostech.com".to_owned(),
            ip: "127.0.0.1".to_owned(),
            details: String::new(),
            module: module.to_owned(),
        }
    }

    #[derive(Default)]
    struct FakeLogs {
        listed: Vec<LogEntry>,
        created: Mutex<Vec<NewLogEntry>>,
        clear_ok: AtomicBool,
    }

    #[async_trait]
    impl LogsApi for FakeLogs {
        async fn list(&self, filters: &LogFilters) -> Vec<LogEntry> {
            let limit = filters.limit.map_or(usize::MAX, |l| l as usize);
            self.listed.iter().take(limit).cloned().collect()
        }

        async fn create(&self, entry: &NewLogEntry) -> Option<LogEntry> {
            if entry.module == "Roto" {
                return None;
            }
            self.created.lock().unwrap().push(entry.clone());
            Some(log("new", entry.level, &entry.module, "2025-03-02T00:00:00"))
        }

        async fn clear_all(&self) -> bool {
            self.clear_ok.load(Ordering::SeqCst)
        }
    }

    fn fixture() -> Vec<LogEntry> {
        vec![
            log("1", LogLevel::Info, "Sistema", "2025-03-01T08:00:00"),
            log("2", LogLevel::Error, "Autenticación", "2025-03-01T10:30:00.123"),
            log("3", LogLevel::Security, "Seguridad", "2025-02-28T23:59:59Z"),
            log("4", LogLevel::Info, "Autenticación", "2025-03-01 09:00:00"),
        ]
    }

    #[tokio::test]
    async fn test_projections() {
        let api = FakeLogs {
            listed: fixture(),
            ..FakeLogs::default()
        };
        let store = LogsStore::new(Arc::new(api));
        store.refresh().await;

        assert_eq!(store.stats(), LogStats {
            total: 4,
            info: 2,
            error: 1,
            security: 1,
            ..LogStats::default()
        });
        let order: Vec<_> = store.sorted().into_iter().map(|e| e.id).collect();
        assert_eq!(order, ["2", "4", "1", "3"]);
        assert_eq!(store.modules(), ["Autenticación", "Seguridad", "Sistema"]);
    }

    #[tokio::test]
    async fn test_shorthand_defaults_user_and_prepends() {
        let api = Arc::new(FakeLogs {
            listed: fixture(),
            ..FakeLogs::default()
        });
        let store = LogsStore::new(Arc::clone(&api) as Arc<dyn LogsApi>);
        store.load(&LogFilters::default()).await;

        let created = store.warning("Stock bajo", "Mouse M-1", "Inventario", None).await;

        assert!(created.is_some());
        assert_eq!(store.entries().first().map(|e| e.id.as_str()), Some("new"));
        let sent = api.created.lock().unwrap();
        assert_eq!(sent[0].user.as_deref(), Some("Sistema"));
        assert_eq!(sent[0].level, LogLevel::Warning);
    }

    #[tokio::test]
    async fn test_failed_create_leaves_list_untouched() {
        let store = LogsStore::new(Arc::new(FakeLogs::default()));
        assert!(store.error("Fallo", "detalle", "Roto", Some("ana@example.com")).await.is_none());
        assert!(store.entries().is_empty());
    }

    #[tokio::test]
    async fn test_clear_only_on_confirmation() {
        let api = Arc::new(FakeLogs {
            listed: fixture(),
            ..FakeLogs::default()
        });
        let store = LogsStore::new(Arc::clone(&api) as Arc<dyn LogsApi>);
        store.refresh().await;

        assert!(!store.clear().await);
        assert_eq!(store.entries().len(), 4);

        api.clear_ok.store(true, Ordering::SeqCst);
        assert!(store.clear().await);
        assert!(store.entries().is_empty());
        assert!(!store.is_loading());
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2025-03-01T10:30:00").is_some());
        assert!(parse_timestamp("2025-03-01T10:30:00.5").is_some());
        assert!(parse_timestamp("2025-03-01T10:30:00-05:00").is_some());
        assert!(parse_timestamp("ayer").is_none());
    }
}
