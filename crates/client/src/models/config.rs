//! Backend configuration entries.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One stored setting: the raw string value plus its type tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEntry {
    #[serde(rename = "valor")]
    pub value: String,
    /// `number`, `boolean`, `string`, ...
    #[serde(rename = "tipo", default)]
    pub kind: String,
    #[serde(rename = "categoria", default)]
    pub category: String,
}

/// Full key map as returned by `GET /config`.
pub type ConfigMap = HashMap<String, ConfigEntry>;

/// One `{clave, valor}` pair for an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigUpdate {
    #[serde(rename = "clave")]
    pub key: String,
    #[serde(rename = "valor")]
    pub value: String,
}

impl ConfigUpdate {
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Body for `PUT /config`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ConfigBatch<'a> {
    #[serde(rename = "configuraciones")]
    pub entries: &'a [ConfigUpdate],
}

/// Typed value of a setting after coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Number(f64),
    Bool(bool),
    Text(String),
}
