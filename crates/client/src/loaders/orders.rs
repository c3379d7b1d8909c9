//! Order management pages: the order list and a single order's detail.
//!
//! These endpoints answer with bare JSON (no envelope) and loaders never
//! fail: errors degrade to an empty list or `None`.

use kronos_core::{OrderId, OrderLineId, ProductId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};
use url::Url;

use crate::http::ApiClient;

/// Filter value meaning "no filter" in the order management UI.
const ALL: &str = "Todos";

/// Filters read from the order list page's query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderListQuery {
    pub status: Option<String>,
    pub payment_status: Option<String>,
    pub search: Option<String>,
}

impl OrderListQuery {
    /// Filters from a page URL (`estado`, `estado_pago`, `search`).
    #[must_use]
    pub fn from_url(url: &Url) -> Self {
        let mut query = Self::default();
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "estado" => query.status = Some(value.into_owned()),
                "estado_pago" => query.payment_status = Some(value.into_owned()),
                "search" => query.search = Some(value.into_owned()),
                _ => {}
            }
        }
        query
    }

    fn params(&self) -> OrderListParams<'_> {
        OrderListParams {
            status: filter_value(self.status.as_deref()),
            payment_status: filter_value(self.payment_status.as_deref()),
            search: self.search.as_deref().filter(|s| !s.is_empty()),
        }
    }
}

fn filter_value(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty() && *v != ALL)
}

#[derive(Debug, Serialize)]
struct OrderListParams<'a> {
    #[serde(rename = "estado", skip_serializing_if = "Option::is_none")]
    status: Option<&'a str>,
    #[serde(rename = "estado_pago", skip_serializing_if = "Option::is_none")]
    payment_status: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<&'a str>,
}

/// Row of the order management list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    #[serde(rename = "id_venta")]
    pub id: OrderId,
    #[serde(rename = "numero_pedido")]
    pub number: String,
    #[serde(rename = "id_usuario")]
    pub user_id: UserId,
    #[serde(rename = "nombre_usuario", default)]
    pub customer_name: Option<String>,
    #[serde(rename = "email_usuario", default)]
    pub customer_email: Option<String>,
    pub subtotal: Decimal,
    #[serde(rename = "descuento_total", default)]
    pub discount_total: Option<Decimal>,
    #[serde(rename = "costo_envio", default)]
    pub shipping_cost: Option<Decimal>,
    pub total: Decimal,
    #[serde(rename = "moneda", default)]
    pub currency: Option<String>,
    #[serde(rename = "estado", default)]
    pub status: Option<String>,
    #[serde(rename = "estado_pago", default)]
    pub payment_status: Option<String>,
    #[serde(rename = "fecha_pedido", default)]
    pub placed_at: Option<String>,
    #[serde(rename = "fecha_entrega_estimada", default)]
    pub estimated_delivery: Option<String>,
}

/// Order with customer, shipping, and line details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub summary: OrderSummary,
    #[serde(rename = "telefono_usuario", default)]
    pub customer_phone: Option<String>,
    #[serde(rename = "dni_usuario", default)]
    pub customer_dni: Option<String>,
    #[serde(rename = "direccion_envio", default)]
    pub shipping_address: Option<String>,
    #[serde(rename = "ciudad", default)]
    pub city: Option<String>,
    #[serde(rename = "departamento", default)]
    pub region: Option<String>,
    #[serde(rename = "codigo_postal", default)]
    pub postal_code: Option<String>,
    #[serde(rename = "telefono_contacto", default)]
    pub contact_phone: Option<String>,
    #[serde(rename = "metodo_envio", default)]
    pub shipping_method: Option<String>,
    #[serde(rename = "numero_tracking", default)]
    pub tracking_number: Option<String>,
    #[serde(rename = "fecha_actualizacion", default)]
    pub updated_at: Option<String>,
    #[serde(rename = "productos", default)]
    pub lines: Vec<OrderDetailLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDetailLine {
    #[serde(rename = "id_detalle_venta")]
    pub id: OrderLineId,
    #[serde(rename = "id_producto")]
    pub product_id: ProductId,
    #[serde(rename = "nombre_producto")]
    pub product_name: String,
    pub sku: String,
    #[serde(rename = "cantidad")]
    pub quantity: i32,
    #[serde(rename = "precio_unitario")]
    pub unit_price: Decimal,
    pub subtotal: Decimal,
    #[serde(rename = "imagen_principal", default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OrdersLoader {
    api: ApiClient,
}

impl OrdersLoader {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Orders matching `query`; empty on any failure.
    #[instrument(skip(self))]
    pub async fn list(&self, query: &OrderListQuery) -> Vec<OrderSummary> {
        match self
            .api
            .get("/ventas")
            .query(&query.params())
            .raw("Failed to fetch orders")
            .await
        {
            Ok(orders) => orders,
            Err(e) => {
                warn!(error = %e, "Error loading orders");
                Vec::new()
            }
        }
    }

    /// One order with its lines; `None` on any failure.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn detail(&self, id: OrderId) -> Option<OrderDetail> {
        match self
            .api
            .get(&format!("/ventas/{id}"))
            .raw("Failed to fetch order details")
            .await
        {
            Ok(order) => Some(order),
            Err(e) => {
                warn!(error = %e, "Error loading order details");
                None
            }
        }
    }
}
