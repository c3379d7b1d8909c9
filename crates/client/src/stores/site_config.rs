//! Site configuration store.
//!
//! Local-first with remote reconciliation: the in-memory record always comes
//! from the most recent successful source. That is the backend when it
//! answers with a non-empty key map, otherwise the persisted copy, otherwise
//! the built-in defaults. Both sources are overlaid on the defaults, never
//! merged with each other.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::Observable;
use crate::models::{ConfigMap, ConfigUpdate, ConfigValue};
use crate::services::{ConfigApi, parse_config_value, stringify_config_value};
use crate::storage::{ClientStorage, keys};

// =============================================================================
// SiteConfig
// =============================================================================

/// Flat, typed site settings.
///
/// Persisted as a camelCase JSON object; missing fields fall back to the
/// defaults when read back.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct SiteConfig {
    // General
    pub site_name: String,
    pub site_description: String,
    pub support_email: String,
    pub contact_phone: String,

    // E-commerce
    pub currency: String,
    pub tax_rate: f64,
    pub free_shipping_threshold: f64,
    pub low_stock_threshold: f64,

    // Shipping
    pub default_shipping_cost: f64,
    pub express_shipping_cost: f64,
    pub estimated_delivery_days: f64,

    // Security
    pub session_timeout: f64,
    pub max_login_attempts: f64,
    pub password_min_length: f64,

    // Features
    pub allow_guest_checkout: bool,
    pub require_email_verification: bool,
    pub enable_reviews: bool,
    pub enable_wishlist: bool,
    pub enable_coupons: bool,

    // Email
    pub email_enabled: bool,
    pub smtp_host: String,
    pub smtp_port: f64,
    pub smtp_user: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: "KronosTech".to_owned(),
            site_description: "Tu tienda de tecnología de confianza".to_owned(),
            support_email: "soporte@kronostech.com".to_owned(),
            contact_phone: "+51 999 999 999".to_owned(),
            currency: "PEN".to_owned(),
            tax_rate: 18.0,
            free_shipping_threshold: 100.0,
            low_stock_threshold: 10.0,
            default_shipping_cost: 15.0,
            express_shipping_cost: 35.0,
            estimated_delivery_days: 3.0,
            session_timeout: 24.0,
            max_login_attempts: 5.0,
            password_min_length: 6.0,
            allow_guest_checkout: true,
            require_email_verification: false,
            enable_reviews: true,
            enable_wishlist: true,
            enable_coupons: true,
            email_enabled: true,
            smtp_host: "smtp.gmail.com".to_owned(),
            smtp_port: 587.0,
            smtp_user: "noreply@kronostech.com".to_owned(),
        }
    }
}

impl SiteConfig {
    /// Defaults overlaid with the backend keys this record knows about.
    /// Unknown keys are ignored.
    #[must_use]
    pub fn from_backend(map: &ConfigMap) -> Self {
        let mut config = Self::default();
        for (key, entry) in map {
            let value = parse_config_value(&entry.value, &entry.kind);
            if !config.apply(key, value) {
                debug!(key = %key, "Ignoring unmapped config key");
            }
        }
        config
    }

    /// Set the field stored under backend key `key`. Returns `false` if the
    /// key is unknown or the value cannot be coerced to the field's type.
    pub fn apply(&mut self, key: &str, value: ConfigValue) -> bool {
        fn text(slot: &mut String, value: ConfigValue) -> bool {
            *slot = stringify_config_value(&value);
            true
        }
        fn number(slot: &mut f64, value: ConfigValue) -> bool {
            match value {
                ConfigValue::Number(n) => *slot = n,
                ConfigValue::Text(s) => match s.trim().parse::<f64>() {
                    Ok(n) if !n.is_nan() => *slot = n,
                    _ => return false,
                },
                ConfigValue::Bool(_) => return false,
            }
            true
        }
        fn flag(slot: &mut bool, value: ConfigValue) -> bool {
            match value {
                ConfigValue::Bool(b) => *slot = b,
                ConfigValue::Text(s) => {
                    let s = s.to_lowercase();
                    *slot = s == "true" || s == "1";
                }
                ConfigValue::Number(_) => return false,
            }
            true
        }

        match key {
            "site_name" => text(&mut self.site_name, value),
            "site_description" => text(&mut self.site_description, value),
            "support_email" => text(&mut self.support_email, value),
            "contact_phone" => text(&mut self.contact_phone, value),
            "currency" => text(&mut self.currency, value),
            "tax_rate" => number(&mut self.tax_rate, value),
            "free_shipping_threshold" => number(&mut self.free_shipping_threshold, value),
            "low_stock_threshold" => number(&mut self.low_stock_threshold, value),
            "default_shipping_cost" => number(&mut self.default_shipping_cost, value),
            "express_shipping_cost" => number(&mut self.express_shipping_cost, value),
            "estimated_delivery_days" => number(&mut self.estimated_delivery_days, value),
            "session_timeout" => number(&mut self.session_timeout, value),
            "max_login_attempts" => number(&mut self.max_login_attempts, value),
            "password_min_length" => number(&mut self.password_min_length, value),
            "allow_guest_checkout" => flag(&mut self.allow_guest_checkout, value),
            "require_email_verification" => flag(&mut self.require_email_verification, value),
            "enable_reviews" => flag(&mut self.enable_reviews, value),
            "enable_wishlist" => flag(&mut self.enable_wishlist, value),
            "enable_coupons" => flag(&mut self.enable_coupons, value),
            "email_enabled" => flag(&mut self.email_enabled, value),
            "smtp_host" => text(&mut self.smtp_host, value),
            "smtp_port" => number(&mut self.smtp_port, value),
            "smtp_user" => text(&mut self.smtp_user, value),
            _ => false,
        }
    }

    /// Every field under its backend key, as typed values.
    #[must_use]
    pub fn entries(&self) -> Vec<(&'static str, ConfigValue)> {
        use ConfigValue::{Bool, Number, Text};

        vec![
            ("site_name", Text(self.site_name.clone())),
            ("site_description", Text(self.site_description.clone())),
            ("support_email", Text(self.support_email.clone())),
            ("contact_phone", Text(self.contact_phone.clone())),
            ("currency", Text(self.currency.clone())),
            ("tax_rate", Number(self.tax_rate)),
            ("free_shipping_threshold", Number(self.free_shipping_threshold)),
            ("low_stock_threshold", Number(self.low_stock_threshold)),
            ("default_shipping_cost", Number(self.default_shipping_cost)),
            ("express_shipping_cost", Number(self.express_shipping_cost)),
            ("estimated_delivery_days", Number(self.estimated_delivery_days)),
            ("session_timeout", Number(self.session_timeout)),
            ("max_login_attempts", Number(self.max_login_attempts)),
            ("password_min_length", Number(self.password_min_length)),
            ("allow_guest_checkout", Bool(self.allow_guest_checkout)),
            ("require_email_verification", Bool(self.require_email_verification)),
            ("enable_reviews", Bool(self.enable_reviews)),
            ("enable_wishlist", Bool(self.enable_wishlist)),
            ("enable_coupons", Bool(self.enable_coupons)),
            ("email_enabled", Bool(self.email_enabled)),
            ("smtp_host", Text(self.smtp_host.clone())),
            ("smtp_port", Number(self.smtp_port)),
            ("smtp_user", Text(self.smtp_user.clone())),
        ]
    }

    /// Batch update pushing every field back to the backend.
    #[must_use]
    pub fn to_updates(&self) -> Vec<ConfigUpdate> {
        self.entries()
            .into_iter()
            .map(|(key, value)| ConfigUpdate::new(key, stringify_config_value(&value)))
            .collect()
    }

    #[must_use]
    pub fn shipping(&self) -> ShippingSettings {
        ShippingSettings {
            default_cost: self.default_shipping_cost,
            express_cost: self.express_shipping_cost,
            free_threshold: self.free_shipping_threshold,
            estimated_days: self.estimated_delivery_days,
        }
    }

    #[must_use]
    pub fn ecommerce(&self) -> EcommerceSettings {
        EcommerceSettings {
            currency: self.currency.clone(),
            tax_rate: self.tax_rate,
            low_stock_threshold: self.low_stock_threshold,
        }
    }

    #[must_use]
    pub const fn features(&self) -> FeatureFlags {
        FeatureFlags {
            guest_checkout: self.allow_guest_checkout,
            email_verification: self.require_email_verification,
            reviews: self.enable_reviews,
            wishlist: self.enable_wishlist,
            coupons: self.enable_coupons,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShippingSettings {
    pub default_cost: f64,
    pub express_cost: f64,
    pub free_threshold: f64,
    pub estimated_days: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EcommerceSettings {
    pub currency: String,
    pub tax_rate: f64,
    pub low_stock_threshold: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct FeatureFlags {
    pub guest_checkout: bool,
    pub email_verification: bool,
    pub reviews: bool,
    pub wishlist: bool,
    pub coupons: bool,
}

/// Result of [`SiteConfigStore::save`], reported per destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOutcome {
    /// The persisted copy was written.
    pub local: bool,
    /// The backend accepted the batch.
    pub remote: bool,
}

impl SaveOutcome {
    /// Whether the configuration survives a restart.
    #[must_use]
    pub const fn saved(self) -> bool {
        self.local
    }
}

// =============================================================================
// Store
// =============================================================================

#[derive(Clone)]
pub struct SiteConfigStore {
    inner: Arc<SiteConfigInner>,
}

struct SiteConfigInner {
    api: Arc<dyn ConfigApi>,
    storage: ClientStorage,
    config: Observable<SiteConfig>,
    loading: Observable<bool>,
    using_remote: Observable<bool>,
}

impl std::fmt::Debug for SiteConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiteConfigStore")
            .field("using_remote", &self.using_remote())
            .finish_non_exhaustive()
    }
}

impl SiteConfigStore {
    /// Store seeded from the persisted copy (or defaults).
    #[must_use]
    pub fn new(api: Arc<dyn ConfigApi>, storage: ClientStorage) -> Self {
        let initial = persisted(&storage);
        Self {
            inner: Arc::new(SiteConfigInner {
                api,
                storage,
                config: Observable::new(initial),
                loading: Observable::new(false),
                using_remote: Observable::new(false),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &Observable<SiteConfig> {
        &self.inner.config
    }

    /// Snapshot of the current settings.
    #[must_use]
    pub fn current(&self) -> SiteConfig {
        self.inner.config.get()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.inner.loading.get()
    }

    /// Whether the current record came from (or reached) the backend.
    #[must_use]
    pub fn using_remote(&self) -> bool {
        self.inner.using_remote.get()
    }

    /// Refresh from the backend, falling back to the persisted copy.
    #[instrument(skip(self))]
    pub async fn load(&self) {
        self.inner.loading.set(true);

        let map = self.inner.api.all().await;
        if map.is_empty() {
            warn!("Configuration API unavailable, using persisted copy");
            self.inner.config.set(persisted(&self.inner.storage));
            self.inner.using_remote.set(false);
        } else {
            let config = SiteConfig::from_backend(&map);
            self.persist(&config);
            self.inner.config.set(config);
            self.inner.using_remote.set(true);
            debug!(keys = map.len(), "Configuration loaded from backend");
        }

        self.inner.loading.set(false);
    }

    /// Persist locally first, then push every field to the backend.
    #[instrument(skip(self, config))]
    pub async fn save(&self, config: SiteConfig) -> SaveOutcome {
        self.inner.loading.set(true);

        let local = self.persist(&config);
        let updates = config.to_updates();
        self.inner.config.set(config);

        let remote = self.inner.api.update_batch(&updates).await;
        if remote {
            info!("Configuration saved");
        } else {
            warn!("Configuration saved locally only");
        }
        self.inner.using_remote.set(remote);

        self.inner.loading.set(false);
        SaveOutcome { local, remote }
    }

    /// Change one setting on top of the freshest record available.
    ///
    /// Reloads first so the other settings are not overwritten with stale
    /// values. Only the changed key is pushed, and only when the backend
    /// answered the reload; otherwise the change is kept locally. Returns
    /// `None` if the key is unknown or the value does not fit its field.
    #[instrument(skip(self, value))]
    pub async fn set_key(&self, key: &str, value: ConfigValue) -> Option<SaveOutcome> {
        self.load().await;

        let mut config = self.current();
        if !config.apply(key, value) {
            return None;
        }
        let update = config
            .entries()
            .into_iter()
            .find(|(k, _)| *k == key)
            .map(|(k, v)| ConfigUpdate::new(k, stringify_config_value(&v)))?;

        let local = self.persist(&config);
        self.inner.config.set(config);

        let remote = if self.using_remote() {
            self.inner.api.update_batch(std::slice::from_ref(&update)).await
        } else {
            warn!(key, "Backend unavailable, setting kept locally");
            false
        };
        self.inner.using_remote.set(remote);
        Some(SaveOutcome { local, remote })
    }

    /// Replace and persist without contacting the backend.
    pub fn set_local(&self, config: SiteConfig) {
        self.persist(&config);
        self.inner.config.set(config);
    }

    /// Restore the built-in defaults locally.
    pub fn reset(&self) {
        self.set_local(SiteConfig::default());
    }

    // ===== Projections =====

    #[must_use]
    pub fn shipping(&self) -> ShippingSettings {
        self.inner.config.with(SiteConfig::shipping)
    }

    #[must_use]
    pub fn ecommerce(&self) -> EcommerceSettings {
        self.inner.config.with(SiteConfig::ecommerce)
    }

    #[must_use]
    pub fn features(&self) -> FeatureFlags {
        self.inner.config.with(SiteConfig::features)
    }

    #[must_use]
    pub fn currency(&self) -> String {
        self.inner.config.with(|c| c.currency.clone())
    }

    #[must_use]
    pub fn tax_rate(&self) -> f64 {
        self.inner.config.with(|c| c.tax_rate)
    }

    #[must_use]
    pub fn free_shipping_threshold(&self) -> f64 {
        self.inner.config.with(|c| c.free_shipping_threshold)
    }

    #[must_use]
    pub fn low_stock_threshold(&self) -> f64 {
        self.inner.config.with(|c| c.low_stock_threshold)
    }

    fn persist(&self, config: &SiteConfig) -> bool {
        match self.inner.storage.set_json(keys::SITE_CONFIG, config) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Failed to persist site configuration");
                false
            }
        }
    }
}

/// Persisted copy overlaid on the defaults.
fn persisted(storage: &ClientStorage) -> SiteConfig {
    storage.get_json(keys::SITE_CONFIG).unwrap_or_default()
}
