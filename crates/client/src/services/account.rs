//! Customer account services: address book, coupons, refunds, saved
//! payment methods, and profile maintenance.

use kronos_core::{AddressId, SavedPaymentMethodId};
use reqwest::StatusCode;
use tracing::{info, instrument};

use crate::error::ServiceError;
use crate::http::ApiClient;
use crate::models::{
    Address, AddressUpdate, NewAddress, NewSavedPaymentMethod, PasswordChange, ProfileUpdate, Refund,
    RefundRequest, RefundRequestOutcome, SavedPaymentMethod, SavedPaymentMethodUpdate, User, UserCoupon,
};

// =============================================================================
// Addresses
// =============================================================================

#[derive(Debug, Clone)]
pub struct AddressService {
    api: ApiClient,
}

impl AddressService {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// # Errors
    ///
    /// Returns `ServiceError` if the request fails.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Address>, ServiceError> {
        self.api
            .get("/direcciones")
            .envelope("Error al obtener direcciones")
            .await
    }

    /// # Errors
    ///
    /// Returns `ServiceError` if the backend rejects the address.
    #[instrument(skip(self, address), fields(city = %address.city))]
    pub async fn create(&self, address: &NewAddress) -> Result<Address, ServiceError> {
        self.api
            .post("/direcciones")
            .json(address)
            .envelope("Error al crear dirección")
            .await
    }

    /// # Errors
    ///
    /// Returns `ServiceError` if the backend rejects the update.
    #[instrument(skip(self, update), fields(address_id = %id))]
    pub async fn update(&self, id: AddressId, update: &AddressUpdate) -> Result<Address, ServiceError> {
        self.api
            .put(&format!("/direcciones/{id}"))
            .json(update)
            .envelope("Error al actualizar dirección")
            .await
    }

    /// # Errors
    ///
    /// Returns `ServiceError` if the backend refuses the deletion.
    #[instrument(skip(self), fields(address_id = %id))]
    pub async fn delete(&self, id: AddressId) -> Result<(), ServiceError> {
        self.api
            .delete(&format!("/direcciones/{id}"))
            .acknowledge("Error al eliminar dirección")
            .await
    }
}

// =============================================================================
// Coupons
// =============================================================================

#[derive(Debug, Clone)]
pub struct CouponService {
    api: ApiClient,
}

impl CouponService {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Coupons assigned to the current user.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the request fails.
    #[instrument(skip(self))]
    pub async fn mine(&self) -> Result<Vec<UserCoupon>, ServiceError> {
        self.api
            .get("/cupones/mis")
            .envelope("Error al obtener tus cupones")
            .await
    }
}

// =============================================================================
// Refunds
// =============================================================================

/// Refund endpoints answer with bare JSON, not the usual envelope.
#[derive(Debug, Clone)]
pub struct RefundService {
    api: ApiClient,
}

impl RefundService {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// # Errors
    ///
    /// Returns `ServiceError` if the request fails.
    #[instrument(skip(self))]
    pub async fn mine(&self) -> Result<Vec<Refund>, ServiceError> {
        self.api
            .get("/mis-reembolsos")
            .raw("Error al obtener reembolsos")
            .await
    }

    /// Ask for a refund on one of the user's orders.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Rejected` when the backend answers
    /// `success: false`, even with a 2xx status.
    #[instrument(skip(self, request), fields(order_id = %request.order_id, kind = ?request.kind))]
    pub async fn request(&self, request: &RefundRequest) -> Result<RefundRequestOutcome, ServiceError> {
        const DEFAULT_MESSAGE: &str = "Error al solicitar reembolso";

        let outcome: RefundRequestOutcome = self
            .api
            .post("/mis-reembolsos/solicitar")
            .json(request)
            .raw(DEFAULT_MESSAGE)
            .await?;

        if !outcome.success {
            return Err(ServiceError::rejected(StatusCode::OK, Some(outcome.message), DEFAULT_MESSAGE));
        }

        info!(refund_id = ?outcome.refund_id, "Refund requested");
        Ok(outcome)
    }
}

// =============================================================================
// Saved payment methods
// =============================================================================

#[derive(Debug, Clone)]
pub struct PaymentMethodService {
    api: ApiClient,
}

impl PaymentMethodService {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// # Errors
    ///
    /// Returns `ServiceError` if the request fails.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<SavedPaymentMethod>, ServiceError> {
        self.api
            .get("/metodos-pago-cliente")
            .envelope("Error al obtener métodos de pago")
            .await
    }

    /// # Errors
    ///
    /// Returns `ServiceError` if the backend rejects the payment method.
    #[instrument(skip(self, method), fields(kind = %method.kind))]
    pub async fn create(&self, method: &NewSavedPaymentMethod) -> Result<SavedPaymentMethod, ServiceError> {
        self.api
            .post("/metodos-pago-cliente")
            .json(method)
            .envelope("Error al crear método de pago")
            .await
    }

    /// # Errors
    ///
    /// Returns `ServiceError` if the backend rejects the update.
    #[instrument(skip(self, update), fields(method_id = %id))]
    pub async fn update(
        &self,
        id: SavedPaymentMethodId,
        update: &SavedPaymentMethodUpdate,
    ) -> Result<SavedPaymentMethod, ServiceError> {
        self.api
            .put(&format!("/metodos-pago-cliente/{id}"))
            .json(update)
            .envelope("Error al actualizar método de pago")
            .await
    }

    /// # Errors
    ///
    /// Returns `ServiceError` if the backend refuses the deletion.
    #[instrument(skip(self), fields(method_id = %id))]
    pub async fn delete(&self, id: SavedPaymentMethodId) -> Result<(), ServiceError> {
        self.api
            .delete(&format!("/metodos-pago-cliente/{id}"))
            .acknowledge("Error al eliminar método de pago")
            .await
    }
}

// =============================================================================
// Profile
// =============================================================================

#[derive(Debug, Clone)]
pub struct ProfileService {
    api: ApiClient,
}

impl ProfileService {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Update the current user's profile fields.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the backend rejects the update.
    #[instrument(skip(self, update))]
    pub async fn update(&self, update: &ProfileUpdate) -> Result<User, ServiceError> {
        self.api
            .put("/auth/perfil")
            .json(update)
            .envelope("Error al actualizar perfil")
            .await
    }

    /// # Errors
    ///
    /// Returns `ServiceError` if the current password is wrong or the request fails.
    #[instrument(skip(self, change))]
    pub async fn change_password(&self, change: &PasswordChange) -> Result<(), ServiceError> {
        self.api
            .put("/auth/cambiar-password")
            .json(change)
            .acknowledge("Error al cambiar contraseña")
            .await
    }
}
