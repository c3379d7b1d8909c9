//! Audit log.

use kronos_client::Storefront;
use kronos_client::models::LogFilters;
use kronos_core::LogLevel;

use crate::error::CliError;

pub async fn list(app: &Storefront, level: Option<LogLevel>, module: Option<String>, limit: u32) {
    let filters = LogFilters {
        level,
        module,
        ..LogFilters::limit(limit)
    };

    let store = app.logs_store();
    store.load(&filters).await;

    for entry in store.sorted() {
        println!(
            "{}  {:<8} {:<16} {:<28} {}  {}",
            entry.timestamp,
            entry.level.as_str(),
            entry.module, entry.action, entry.user, entry.details
        );
    }

    let stats = store.stats();
    println!(
        "{} event(s): {} info, {} success, {} warning, {} error, {} security",
        stats.total, stats.info, stats.success, stats.warning, stats.error, stats.security
    );
}

pub async fn clear(app: &Storefront) -> Result<(), CliError> {
    if app.logs_store().clear().await {
        println!("Audit log cleared");
        Ok(())
    } else {
        Err(CliError::Failed("clearing the audit log"))
    }
}
