//! Checkout and order types.

use kronos_core::{AddressId, OrderId, OrderLineId, OrderStatus, PaymentMethodId, PaymentStatus, UserId, VariantId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payment method offered at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    #[serde(rename = "id_metodo_pago")]
    pub id: PaymentMethodId,
    #[serde(rename = "nombre")]
    pub name: String,
    /// `tarjeta_credito`, `billetera_digital`, `efectivo`, ...
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "proveedor", default)]
    pub provider: Option<String>,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    #[serde(rename = "icono", default)]
    pub icon: Option<String>,
    #[serde(rename = "comision_porcentaje", default)]
    pub fee_percent: Decimal,
    #[serde(rename = "comision_fija", default)]
    pub fee_fixed: Decimal,
    #[serde(rename = "tiempo_procesamiento", default)]
    pub processing_time: Option<String>,
    #[serde(rename = "instrucciones", default)]
    pub instructions: Option<String>,
}

/// Totals quoted by `GET /checkout/calcular-total`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutTotals {
    pub subtotal: Decimal,
    #[serde(rename = "descuento_total", default)]
    pub discount_total: Decimal,
    #[serde(rename = "descuento_cupon", default)]
    pub coupon_discount: Decimal,
    #[serde(rename = "costo_envio", default)]
    pub shipping_cost: Decimal,
    pub total: Decimal,
    #[serde(rename = "items_count", default)]
    pub item_count: i32,
    #[serde(rename = "cupon_aplicado", default)]
    pub applied_coupon: Option<String>,
}

/// Order placement request for `POST /checkout/procesar`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutRequest {
    #[serde(rename = "id_direccion")]
    pub address_id: AddressId,
    #[serde(rename = "id_metodo_pago")]
    pub payment_method_id: PaymentMethodId,
    #[serde(rename = "notas_cliente", skip_serializing_if = "Option::is_none")]
    pub customer_notes: Option<String>,
    #[serde(rename = "codigo_cupon", skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
}

/// Customer order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "id_venta")]
    pub id: OrderId,
    #[serde(rename = "numero_pedido")]
    pub number: String,
    #[serde(rename = "id_usuario")]
    pub user_id: UserId,
    pub subtotal: Decimal,
    #[serde(rename = "descuento_total", default)]
    pub discount_total: Decimal,
    #[serde(rename = "costo_envio", default)]
    pub shipping_cost: Decimal,
    pub total: Decimal,
    #[serde(rename = "moneda", default)]
    pub currency: String,
    #[serde(rename = "estado")]
    pub status: OrderStatus,
    #[serde(rename = "estado_pago")]
    pub payment_status: PaymentStatus,
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
    #[serde(rename = "fecha_pedido")]
    pub placed_at: String,
    #[serde(rename = "fecha_pago", default)]
    pub paid_at: Option<String>,
    #[serde(rename = "fecha_entrega_estimada", default)]
    pub estimated_delivery: Option<String>,
    #[serde(rename = "notas_cliente", default)]
    pub customer_notes: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderLine>,
}

/// One line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    #[serde(rename = "id_detalle_venta")]
    pub id: OrderLineId,
    #[serde(rename = "id_producto_detalle")]
    pub variant_id: VariantId,
    #[serde(rename = "nombre_producto")]
    pub product_name: String,
    pub sku: String,
    #[serde(rename = "imagen", default)]
    pub image: Option<String>,
    #[serde(rename = "cantidad")]
    pub quantity: i32,
    #[serde(rename = "precio_unitario")]
    pub unit_price: Decimal,
    #[serde(rename = "descuento_unitario", default)]
    pub unit_discount: Decimal,
    #[serde(rename = "precio_final")]
    pub final_price: Decimal,
    pub subtotal: Decimal,
}

/// Pagination for `GET /pedidos`. Zero values are omitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub(crate) struct OrderPage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

/// Query for `GET /checkout/calcular-total`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub(crate) struct TotalsQuery {
    #[serde(rename = "id_direccion", skip_serializing_if = "Option::is_none")]
    pub address_id: Option<AddressId>,
    #[serde(rename = "codigo_cupon", skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_from_backend_json() {
        let json = r#"{
            "id_venta": 40, "numero_pedido": "KT-000040", "id_usuario": 7,
            "subtotal": "200.00", "descuento_total": "0", "costo_envio": "15.00",
            "total": "215.00", "moneda": "PEN", "estado": "pendiente",
            "estado_pago": "pendiente", "fecha_pedido": "2025-03-01T10:00:00Z",
            "items": [{
                "id_detalle_venta": 1, "id_producto_detalle": 5, "nombre_producto": "Mouse",
                "sku": "M-1", "cantidad": 2, "precio_unitario": "100.00",
                "descuento_unitario": "0", "precio_final": "100.00", "subtotal": "200.00"
            }]
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.total, Decimal::new(21500, 2));
    }

    #[test]
    fn test_checkout_request_omits_empty_optionals() {
        let request = CheckoutRequest {
            address_id: AddressId::new(1),
            payment_method_id: PaymentMethodId::new(2),
            customer_notes: None,
            coupon_code: Some("BIENVENIDA10".to_owned()),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"id_direccion": 1, "id_metodo_pago": 2, "codigo_cupon": "BIENVENIDA10"})
        );
    }
}
