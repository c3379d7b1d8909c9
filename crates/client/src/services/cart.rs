//! Cart service. Every operation answers with the full cart snapshot.

use async_trait::async_trait;
use kronos_core::CartLineId;
use tracing::instrument;

use crate::error::ServiceError;
use crate::http::ApiClient;
use crate::models::{AddToCart, Cart, QuantityUpdate};

/// Cart operations the cart store depends on.
#[async_trait]
pub trait CartApi: Send + Sync {
    async fn get(&self) -> Result<Cart, ServiceError>;
    async fn add_item(&self, item: AddToCart) -> Result<Cart, ServiceError>;
    async fn update_quantity(&self, line: CartLineId, quantity: i32) -> Result<Cart, ServiceError>;
    async fn remove_item(&self, line: CartLineId) -> Result<Cart, ServiceError>;
    async fn clear(&self) -> Result<Cart, ServiceError>;
}

#[derive(Debug, Clone)]
pub struct CartService {
    api: ApiClient,
}

impl CartService {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl CartApi for CartService {
    #[instrument(skip(self))]
    async fn get(&self) -> Result<Cart, ServiceError> {
        self.api.get("/carrito").envelope("Error al obtener el carrito").await
    }

    #[instrument(skip(self), fields(variant_id = %item.variant_id, quantity = item.quantity))]
    async fn add_item(&self, item: AddToCart) -> Result<Cart, ServiceError> {
        self.api
            .post("/carrito/items")
            .json(&item)
            .envelope("Error al agregar producto al carrito")
            .await
    }

    #[instrument(skip(self), fields(line_id = %line))]
    async fn update_quantity(&self, line: CartLineId, quantity: i32) -> Result<Cart, ServiceError> {
        self.api
            .patch(&format!("/carrito/items/{line}"))
            .json(&QuantityUpdate { quantity })
            .envelope("Error al actualizar la cantidad")
            .await
    }

    #[instrument(skip(self), fields(line_id = %line))]
    async fn remove_item(&self, line: CartLineId) -> Result<Cart, ServiceError> {
        self.api
            .delete(&format!("/carrito/items/{line}"))
            .envelope("Error al eliminar el producto")
            .await
    }

    #[instrument(skip(self))]
    async fn clear(&self) -> Result<Cart, ServiceError> {
        self.api.delete("/carrito").envelope("Error al limpiar el carrito").await
    }
}
