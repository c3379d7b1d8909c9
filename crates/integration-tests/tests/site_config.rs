//! Site configuration: backend reconciliation, persisted fallback, and the
//! per-key configuration service.

#![allow(clippy::unwrap_used)]

use kronos_client::services::DEFAULT_SESSION_TIMEOUT_HOURS;
use kronos_client::models::ConfigValue;
use kronos_client::storage::keys;
use kronos_client::stores::{SaveOutcome, SiteConfig};
use kronos_client::{ClientStorage, FileStorage};
use kronos_integration_tests::MockBackend;

#[tokio::test]
async fn test_load_overlays_backend_values_and_persists() {
    let backend = MockBackend::start().await;
    let storage = ClientStorage::memory();
    let app = backend.storefront(storage.clone());

    assert!(!app.site_config().using_remote());
    app.site_config().load().await;

    assert!(app.site_config().using_remote());
    let config = app.site_config().current();
    assert_eq!(config.site_name, "KronosTech Perú");
    assert!((config.tax_rate - 0.18).abs() < f64::EPSILON);
    assert!((config.free_shipping_threshold - 250.0).abs() < f64::EPSILON);
    assert!((config.session_timeout - 12.0).abs() < f64::EPSILON);
    assert!(!config.enable_reviews);
    // Keys the backend does not send keep their defaults.
    assert_eq!(config.support_email, SiteConfig::default().support_email);

    let persisted: SiteConfig = storage.get_json(keys::SITE_CONFIG).unwrap();
    assert_eq!(persisted, config);
}

#[tokio::test]
async fn test_unreachable_backend_falls_back_to_persisted_copy() {
    let backend = MockBackend::start().await;
    backend.data().config_available = false;

    let storage = ClientStorage::memory();
    let local = SiteConfig {
        site_name: "Copia local".to_owned(),
        currency: "USD".to_owned(),
        ..SiteConfig::default()
    };
    storage.set_json(keys::SITE_CONFIG, &local).unwrap();

    let app = backend.storefront(storage);
    app.site_config().load().await;

    assert!(!app.site_config().using_remote());
    assert_eq!(app.site_config().current(), local);
    assert_eq!(app.site_config().currency(), "USD");
}

#[tokio::test]
async fn test_unreachable_backend_without_copy_uses_defaults() {
    let backend = MockBackend::start().await;
    backend.data().config_available = false;
    let app = backend.storefront(ClientStorage::memory());

    app.site_config().load().await;

    assert!(!app.site_config().using_remote());
    assert_eq!(app.site_config().current(), SiteConfig::default());
}

#[tokio::test]
async fn test_save_pushes_every_field() {
    let backend = MockBackend::start().await;
    let storage = ClientStorage::memory();
    let app = backend.storefront(storage.clone());

    let mut config = app.site_config().current();
    config.currency = "USD".to_owned();
    config.smtp_host = "smtp.kronostech.pe".to_owned();

    let outcome = app.site_config().save(config.clone()).await;

    assert_eq!(outcome, SaveOutcome { local: true, remote: true });
    assert!(app.site_config().using_remote());
    {
        let data = backend.data();
        assert_eq!(data.config.get("currency").unwrap().0, "USD");
        assert_eq!(data.config.get("smtp_host").unwrap().0, "smtp.kronostech.pe");
    }
    let batches: Vec<_> = backend
        .requests_to("/config")
        .into_iter()
        .filter(|r| r.method == "PUT")
        .collect();
    assert_eq!(batches.len(), 1);

    let persisted: SiteConfig = storage.get_json(keys::SITE_CONFIG).unwrap();
    assert_eq!(persisted, config);
}

#[tokio::test]
async fn test_save_while_backend_down_is_local_only() {
    let backend = MockBackend::start().await;
    backend.data().config_available = false;
    let storage = ClientStorage::memory();
    let app = backend.storefront(storage.clone());

    let config = SiteConfig {
        site_name: "Sin conexión".to_owned(),
        ..SiteConfig::default()
    };
    let outcome = app.site_config().save(config).await;

    assert_eq!(outcome, SaveOutcome { local: true, remote: false });
    assert!(outcome.saved());
    assert!(!app.site_config().using_remote());
    assert_eq!(app.site_config().current().site_name, "Sin conexión");
    let persisted: SiteConfig = storage.get_json(keys::SITE_CONFIG).unwrap();
    assert_eq!(persisted.site_name, "Sin conexión");
}

#[tokio::test]
async fn test_save_without_storage_reports_remote_only() {
    let backend = MockBackend::start().await;
    let app = backend.storefront(ClientStorage::detached());

    let outcome = app.site_config().save(SiteConfig::default()).await;

    assert_eq!(outcome, SaveOutcome { local: false, remote: true });
    assert!(!outcome.saved());
}

#[tokio::test]
async fn test_config_survives_restart_in_file_storage() {
    let backend = MockBackend::start().await;
    let dir = tempfile::tempdir().unwrap();

    let first = backend.storefront(ClientStorage::new(FileStorage::new(dir.path())));
    first.site_config().load().await;
    let loaded = first.site_config().current();
    drop(first);

    backend.data().config_available = false;
    let second = backend.storefront(ClientStorage::new(FileStorage::new(dir.path())));
    assert_eq!(second.site_config().current(), loaded);

    second.site_config().load().await;
    assert_eq!(second.site_config().current().site_name, "KronosTech Perú");
}

#[tokio::test]
async fn test_set_key_on_fresh_state_keeps_other_backend_settings() {
    let backend = MockBackend::start().await;
    let before = backend.data().config.clone();
    let app = backend.storefront(ClientStorage::memory());

    let outcome = app
        .site_config()
        .set_key("tax_rate", ConfigValue::Text("16".to_owned()))
        .await
        .unwrap();

    assert_eq!(outcome, SaveOutcome { local: true, remote: true });
    assert_eq!(app.site_config().current().site_name, "KronosTech Perú");
    {
        let data = backend.data();
        assert_eq!(data.config.len(), before.len());
        assert_eq!(data.config.get("tax_rate").unwrap().0, "16");
        for (key, value) in before.iter().filter(|(k, _)| k.as_str() != "tax_rate") {
            assert_eq!(data.config.get(key), Some(value), "{key} changed");
        }
    }
}

#[tokio::test]
async fn test_set_key_while_backend_down_pushes_nothing() {
    let backend = MockBackend::start().await;
    backend.data().config_available = false;
    let app = backend.storefront(ClientStorage::memory());

    let outcome = app
        .site_config()
        .set_key("currency", ConfigValue::Text("USD".to_owned()))
        .await
        .unwrap();

    assert_eq!(outcome, SaveOutcome { local: true, remote: false });
    assert_eq!(app.site_config().currency(), "USD");
    assert!(
        backend
            .requests_to("/config")
            .iter()
            .all(|r| r.method != "PUT")
    );
}

// ========== Per-key service ==========

#[tokio::test]
async fn test_config_service_reads_and_writes_single_keys() {
    let backend = MockBackend::start().await;
    let app = backend.storefront(ClientStorage::memory());
    let service = app.config();

    assert_eq!(service.get("currency").await.as_deref(), Some("PEN"));
    assert_eq!(service.get("no_such_key").await, None);

    assert!(service.update("currency", "USD").await);
    assert_eq!(service.get("currency").await.as_deref(), Some("USD"));

    assert_eq!(service.session_timeout().await, 12);
}

#[tokio::test]
async fn test_config_service_degrades_when_backend_down() {
    let backend = MockBackend::start().await;
    backend.data().config_available = false;
    let app = backend.storefront(ClientStorage::memory());

    assert_eq!(app.config().get("currency").await, None);
    assert!(!app.config().update("currency", "USD").await);
    assert_eq!(app.config().session_timeout().await, DEFAULT_SESSION_TIMEOUT_HOURS);
}
