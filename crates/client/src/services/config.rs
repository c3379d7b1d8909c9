//! Backend key/value configuration.
//!
//! Values are stored as strings tagged with a type (`number`, `boolean`,
//! `string`). Reads degrade to neutral values on failure so the site keeps
//! rendering with its local defaults.

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::http::ApiClient;
use crate::models::{ConfigBatch, ConfigEntry, ConfigMap, ConfigUpdate, ConfigValue};

/// Session lifetime used when the backend has no usable value.
pub const DEFAULT_SESSION_TIMEOUT_HOURS: i64 = 24;

/// Configuration operations the site-config store depends on.
#[async_trait]
pub trait ConfigApi: Send + Sync {
    /// Every stored setting; empty on any failure.
    async fn all(&self) -> ConfigMap;

    /// Whether the backend accepted the whole batch.
    async fn update_batch(&self, entries: &[ConfigUpdate]) -> bool;
}

#[derive(Debug, Clone)]
pub struct ConfigService {
    api: ApiClient,
}

impl ConfigService {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Raw value of one key. `None` if missing, blank, or on failure.
    #[instrument(skip(self))]
    pub async fn get(&self, key: &str) -> Option<String> {
        match self
            .api
            .get(&format!("/config/{key}"))
            .envelope::<ConfigEntry>("Error al obtener configuración")
            .await
        {
            Ok(entry) if !entry.value.is_empty() => Some(entry.value),
            Ok(_) => None,
            Err(e) => {
                debug!(error = %e, "Config key unavailable");
                None
            }
        }
    }

    /// Store one value. Any 2xx answer counts as success.
    #[instrument(skip(self, value))]
    pub async fn update(&self, key: &str, value: &str) -> bool {
        let body = ConfigUpdate::new(key, value);
        match self
            .api
            .put(&format!("/config/{key}"))
            .json(&body)
            .execute("Error al actualizar configuración")
            .await
        {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Failed to update config key");
                false
            }
        }
    }

    /// Session lifetime in hours; [`DEFAULT_SESSION_TIMEOUT_HOURS`] when
    /// the backend has no positive value.
    #[instrument(skip(self))]
    pub async fn session_timeout(&self) -> i64 {
        match self
            .api
            .get("/config/session-timeout")
            .envelope::<i64>("Error al obtener tiempo de sesión")
            .await
        {
            Ok(hours) if hours > 0 => hours,
            Ok(_) => DEFAULT_SESSION_TIMEOUT_HOURS,
            Err(e) => {
                debug!(error = %e, "Using default session timeout");
                DEFAULT_SESSION_TIMEOUT_HOURS
            }
        }
    }
}

#[async_trait]
impl ConfigApi for ConfigService {
    #[instrument(skip(self))]
    async fn all(&self) -> ConfigMap {
        match self.api.get("/config").envelope("Error al obtener configuración").await {
            Ok(map) => map,
            Err(e) => {
                warn!(error = %e, "Failed to fetch site configuration");
                ConfigMap::new()
            }
        }
    }

    #[instrument(skip(self, entries), fields(count = entries.len()))]
    async fn update_batch(&self, entries: &[ConfigUpdate]) -> bool {
        match self
            .api
            .put("/config")
            .json(&ConfigBatch { entries })
            .acknowledge("Error al actualizar configuración")
            .await
        {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Failed to push configuration batch");
                false
            }
        }
    }
}

/// Coerce a stored string by its type tag.
///
/// `number` reads the longest leading decimal literal (so `"15abc"` is 15)
/// and falls back to `0` when there is none. `boolean` is true for `"true"`
/// (any case) or `"1"`. Anything else stays text.
#[must_use]
pub fn parse_config_value(value: &str, kind: &str) -> ConfigValue {
    match kind {
        "number" => ConfigValue::Number(leading_number(value).unwrap_or(0.0)),
        "boolean" => {
            let v = value.to_lowercase();
            ConfigValue::Bool(v == "true" || v == "1")
        }
        _ => ConfigValue::Text(value.to_owned()),
    }
}

/// Longest prefix of `value` (after leading whitespace) that forms a decimal
/// literal with optional sign, fraction and exponent, or `Infinity`.
fn leading_number(value: &str) -> Option<f64> {
    let s = value.trim_start();
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);
    if unsigned.starts_with("Infinity") {
        return Some(if s.starts_with('-') { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let bytes = s.as_bytes();
    let digits_from = |start: usize| {
        bytes
            .iter()
            .skip(start)
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = s.len() - unsigned.len();
    let whole = digits_from(end);
    end += whole;
    let mut fraction = 0;
    if bytes.get(end) == Some(&b'.') {
        fraction = digits_from(end + 1);
        if whole + fraction > 0 {
            end += 1 + fraction;
        }
    }
    if whole + fraction == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+' | b'-')));
        let exponent = digits_from(end + 1 + sign);
        if exponent > 0 {
            end += 1 + sign + exponent;
        }
    }

    s.get(..end)?.parse::<f64>().ok().filter(|n| !n.is_nan())
}

/// Inverse of [`parse_config_value`]: integral numbers render without a
/// fractional part.
#[must_use]
pub fn stringify_config_value(value: &ConfigValue) -> String {
    match value {
        ConfigValue::Number(n) => n.to_string(),
        ConfigValue::Bool(b) => b.to_string(),
        ConfigValue::Text(s) => s.clone(),
    }
}
