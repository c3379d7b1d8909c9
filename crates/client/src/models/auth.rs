//! Account and session types.

use kronos_core::{UserId, UserRole};
use serde::{Deserialize, Serialize};

/// Authenticated account profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "id_usuario")]
    pub id: UserId,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    pub email: String,
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,
    /// National identity document number.
    #[serde(default)]
    pub dni: Option<String>,
    #[serde(rename = "rol")]
    pub role: UserRole,
    #[serde(rename = "email_verificado", default)]
    pub email_verified: bool,
    #[serde(rename = "activo", default = "default_true")]
    pub active: bool,
    #[serde(rename = "fecha_registro", default)]
    pub registered_at: String,
}

impl User {
    /// "First Last".
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

pub(crate) const fn default_true() -> bool {
    true
}

/// Credentials for `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remember_me: Option<bool>,
}

impl LoginRequest {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            remember_me: None,
        }
    }
}

/// Payload of a successful login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    pub token: String,
    #[serde(rename = "usuario")]
    pub user: User,
}

/// Sign-up form for `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    pub email: String,
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dni: Option<String>,
    pub password: String,
}

/// Payload of a successful registration.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterData {
    #[serde(default)]
    pub message: String,
    #[serde(rename = "usuario")]
    pub user: User,
}

/// Partial profile update for `PUT /auth/perfil`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(rename = "apellido", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dni: Option<String>,
}

/// Body for `PUT /auth/cambiar-password`.
#[derive(Debug, Clone, Serialize)]
pub struct PasswordChange {
    #[serde(rename = "password_actual")]
    pub current: String,
    #[serde(rename = "password_nuevo")]
    pub new: String,
}
