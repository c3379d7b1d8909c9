//! Checkout and order history.

use kronos_core::{AddressId, OrderId};
use tracing::{info, instrument};

use crate::error::ServiceError;
use crate::http::ApiClient;
use crate::models::{CheckoutRequest, CheckoutTotals, Order, OrderPage, PaymentMethod, TotalsQuery};

#[derive(Debug, Clone)]
pub struct CheckoutService {
    api: ApiClient,
}

/// Canonical form of a coupon code: trimmed, uppercased, `None` when blank.
#[must_use]
pub fn normalize_coupon(code: Option<&str>) -> Option<String> {
    code.map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_uppercase)
}

impl CheckoutService {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Active payment methods offered at checkout.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the request fails.
    #[instrument(skip(self))]
    pub async fn payment_methods(&self) -> Result<Vec<PaymentMethod>, ServiceError> {
        self.api
            .get("/metodos-pago")
            .envelope("Error al obtener métodos de pago")
            .await
    }

    /// Quote the current cart's totals for an address and optional coupon.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the backend rejects the coupon or the request fails.
    #[instrument(skip(self))]
    pub async fn calculate_totals(
        &self,
        address_id: Option<AddressId>,
        coupon_code: Option<&str>,
    ) -> Result<CheckoutTotals, ServiceError> {
        let query = TotalsQuery {
            address_id,
            coupon_code: normalize_coupon(coupon_code),
        };
        self.api
            .get("/checkout/calcular-total")
            .query(&query)
            .envelope("Error al calcular total")
            .await
    }

    /// Place the order. The backend empties the cart on success.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the backend refuses the order or the request fails.
    #[instrument(skip(self, request), fields(address_id = %request.address_id))]
    pub async fn place_order(&self, request: &CheckoutRequest) -> Result<Order, ServiceError> {
        let request = CheckoutRequest {
            coupon_code: normalize_coupon(request.coupon_code.as_deref()),
            ..request.clone()
        };
        let order: Order = self
            .api
            .post("/checkout/procesar")
            .json(&request)
            .envelope("Error al procesar checkout")
            .await?;

        info!(order_id = %order.id, number = %order.number, "Order placed");
        Ok(order)
    }

    /// # Errors
    ///
    /// Returns `ServiceError` if the order does not belong to the user or the request fails.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn order(&self, id: OrderId) -> Result<Order, ServiceError> {
        self.api
            .get(&format!("/pedidos/{id}"))
            .envelope("Error al obtener pedido")
            .await
    }

    /// The user's orders. Zero `limit`/`offset` are not sent.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError` if the request fails.
    #[instrument(skip(self))]
    pub async fn orders(&self, limit: u32, offset: u32) -> Result<Vec<Order>, ServiceError> {
        let page = OrderPage {
            limit: (limit > 0).then_some(limit),
            offset: (offset > 0).then_some(offset),
        };
        self.api
            .get("/pedidos")
            .query(&page)
            .envelope("Error al obtener pedidos")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_coupon() {
        assert_eq!(normalize_coupon(Some("  bienvenida10 ")), Some("BIENVENIDA10".to_owned()));
        assert_eq!(normalize_coupon(Some("   ")), None);
        assert_eq!(normalize_coupon(Some("")), None);
        assert_eq!(normalize_coupon(None), None);
    }
}
