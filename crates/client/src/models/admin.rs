//! User administration types (super-admin only endpoints).

use kronos_core::{UserId, UserRole};
use serde::{Deserialize, Serialize};

/// Account as seen by the administration console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    #[serde(rename = "id_usuario")]
    pub id: UserId,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    pub email: String,
    #[serde(rename = "rol")]
    pub role: UserRole,
    #[serde(rename = "activo")]
    pub active: bool,
    #[serde(rename = "email_verificado", default)]
    pub email_verified: bool,
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub dni: Option<String>,
    #[serde(rename = "fecha_registro", default)]
    pub registered_at: String,
    #[serde(rename = "ultima_conexion", default)]
    pub last_seen_at: Option<String>,
}

/// Filters for `GET /admin/usuarios`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UserListParams {
    #[serde(rename = "rol", skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(rename = "activo", skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

/// Partial update for `PUT /admin/usuarios/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AdminUserUpdate {
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(rename = "apellido", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(rename = "rol", skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(rename = "activo", skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(rename = "email_verificado", skip_serializing_if = "Option::is_none")]
    pub email_verified: Option<bool>,
}

/// Body for `POST /admin/administradores`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewAdministrator {
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    pub email: String,
    pub password: String,
    /// `Admin` or `SuperAdmin`.
    #[serde(rename = "rol")]
    pub role: UserRole,
}
