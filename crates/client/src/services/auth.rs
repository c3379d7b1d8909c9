//! Authentication service: login, registration, identity check, logout.

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::error::ServiceError;
use crate::http::ApiClient;
use crate::models::{LoginData, LoginRequest, RegisterData, RegisterRequest, User};

/// Session operations the auth store depends on.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Whether a credential is currently stored.
    fn has_token(&self) -> bool;

    /// Exchange credentials for a session; stores the token on success.
    async fn login(&self, request: &LoginRequest) -> Result<LoginData, ServiceError>;

    /// Identity check; forgets the token on any failure.
    async fn current_user(&self) -> Result<User, ServiceError>;

    /// End the session. Never fails; the token is always forgotten.
    async fn logout(&self);
}

#[derive(Debug, Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Create an account. Does not start a session.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the backend rejects the registration.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisterData, ServiceError> {
        self.api
            .post("/auth/register")
            .json(request)
            .envelope("Error al registrar usuario")
            .await
    }
}

#[async_trait]
impl AuthApi for AuthService {
    fn has_token(&self) -> bool {
        self.api.tokens().is_authenticated()
    }

    #[instrument(skip(self, request), fields(email = %request.email))]
    async fn login(&self, request: &LoginRequest) -> Result<LoginData, ServiceError> {
        let data: LoginData = self
            .api
            .post("/auth/login")
            .json(request)
            .envelope("Error al iniciar sesión")
            .await?;

        if !data.token.is_empty() {
            self.api.tokens().set(&data.token);
        }

        Ok(data)
    }

    #[instrument(skip(self))]
    async fn current_user(&self) -> Result<User, ServiceError> {
        let result = self
            .api
            .get("/auth/me")
            .envelope::<User>("Error al obtener usuario")
            .await;

        if let Err(e) = &result {
            debug!(error = %e, "Identity check failed, dropping token");
            self.api.tokens().remove();
        }

        result
    }

    #[instrument(skip(self))]
    async fn logout(&self) {
        if let Err(e) = self.api.post("/auth/logout").execute("Error al cerrar sesión").await {
            debug!(error = %e, "Ignoring logout failure");
        }
        self.api.tokens().remove();
    }
}
