//! Customer address book types.

use kronos_core::{AddressId, AddressKind};
use serde::{Deserialize, Serialize};

use super::auth::default_true;

/// Saved address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(rename = "id_direccion")]
    pub id: AddressId,
    #[serde(rename = "tipo")]
    pub kind: AddressKind,
    #[serde(rename = "nombre_completo", default)]
    pub recipient: Option<String>,
    #[serde(rename = "direccion_linea1")]
    pub line1: String,
    #[serde(rename = "direccion_linea2", default)]
    pub line2: Option<String>,
    #[serde(rename = "ciudad")]
    pub city: String,
    #[serde(rename = "departamento")]
    pub region: String,
    #[serde(rename = "codigo_postal", default)]
    pub postal_code: Option<String>,
    #[serde(rename = "pais")]
    pub country: String,
    #[serde(rename = "telefono_contacto", default)]
    pub contact_phone: Option<String>,
    #[serde(rename = "referencia", default)]
    pub reference: Option<String>,
    /// Flagged as the customer's default address.
    #[serde(rename = "es_predeterminada", default)]
    pub is_default: bool,
    #[serde(rename = "activo", default = "default_true")]
    pub active: bool,
    #[serde(rename = "fecha_creacion", default)]
    pub created_at: String,
}

/// Body for `POST /direcciones`. The backend defaults `pais` to Perú.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewAddress {
    #[serde(rename = "tipo")]
    pub kind: AddressKind,
    #[serde(rename = "nombre_completo", skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    #[serde(rename = "direccion_linea1")]
    pub line1: String,
    #[serde(rename = "direccion_linea2", skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    #[serde(rename = "ciudad")]
    pub city: String,
    #[serde(rename = "departamento")]
    pub region: String,
    #[serde(rename = "codigo_postal", skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(rename = "pais", skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(rename = "telefono_contacto", skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(rename = "referencia", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(rename = "es_predeterminada", skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

/// Partial update for `PUT /direcciones/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AddressUpdate {
    #[serde(rename = "tipo", skip_serializing_if = "Option::is_none")]
    pub kind: Option<AddressKind>,
    #[serde(rename = "nombre_completo", skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    #[serde(rename = "direccion_linea1", skip_serializing_if = "Option::is_none")]
    pub line1: Option<String>,
    #[serde(rename = "direccion_linea2", skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    #[serde(rename = "ciudad", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(rename = "departamento", skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(rename = "codigo_postal", skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(rename = "pais", skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(rename = "telefono_contacto", skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(rename = "referencia", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(rename = "es_predeterminada", skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
    #[serde(rename = "activo", skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}
