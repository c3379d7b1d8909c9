//! User administration (super-admin endpoints).

use kronos_core::UserId;
use tracing::{info, instrument};

use crate::error::ServiceError;
use crate::http::ApiClient;
use crate::models::{AdminUser, AdminUserUpdate, NewAdministrator, UserListParams};

#[derive(Debug, Clone)]
pub struct AdminService {
    api: ApiClient,
}

impl AdminService {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// # Errors
    ///
    /// Returns `ServiceError` if the caller lacks permission or the request fails.
    #[instrument(skip(self))]
    pub async fn list_users(&self, params: UserListParams) -> Result<Vec<AdminUser>, ServiceError> {
        self.api
            .get("/admin/usuarios")
            .query(&params)
            .envelope("Error al listar usuarios")
            .await
    }

    /// # Errors
    ///
    /// Returns `ServiceError` if the backend rejects the update.
    #[instrument(skip(self, update), fields(user_id = %id))]
    pub async fn update_user(&self, id: UserId, update: &AdminUserUpdate) -> Result<AdminUser, ServiceError> {
        self.api
            .put(&format!("/admin/usuarios/{id}"))
            .json(update)
            .envelope("Error al actualizar usuario")
            .await
    }

    /// # Errors
    ///
    /// Returns `ServiceError` if the email is taken or the request fails.
    #[instrument(skip(self, admin), fields(email = %admin.email, role = %admin.role))]
    pub async fn create_administrator(&self, admin: &NewAdministrator) -> Result<AdminUser, ServiceError> {
        let created: AdminUser = self
            .api
            .post("/admin/administradores")
            .json(admin)
            .envelope("Error al crear administrador")
            .await?;

        info!(user_id = %created.id, "Administrator created");
        Ok(created)
    }
}
