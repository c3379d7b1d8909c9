//! Shopping cart types.

use chrono::{DateTime, Utc};
use kronos_core::{CartId, CartLineId, ProductId, UserId, VariantId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Server-computed cart snapshot.
///
/// Always replaced wholesale from the latest server response; totals are
/// never recomputed client-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(rename = "id_carrito")]
    pub id: CartId,
    #[serde(rename = "id_usuario", default)]
    pub user_id: Option<UserId>,
    pub items: Vec<CartItem>,
    #[serde(rename = "total_items")]
    pub item_count: i32,
    pub subtotal: Decimal,
    #[serde(rename = "fecha_actualizacion")]
    pub updated_at: DateTime<Utc>,
}

/// One line of the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(rename = "id_carrito_detalle")]
    pub id: CartLineId,
    #[serde(rename = "id_producto_detalle")]
    pub variant_id: VariantId,
    #[serde(rename = "id_producto", default)]
    pub product_id: Option<ProductId>,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(rename = "imagen_principal", default)]
    pub image: Option<String>,
    #[serde(rename = "precio_unitario")]
    pub unit_price: Decimal,
    #[serde(rename = "cantidad")]
    pub quantity: i32,
    pub subtotal: Decimal,
    #[serde(rename = "stock_disponible", default)]
    pub stock: i32,
}

/// Body for `POST /carrito/items`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AddToCart {
    #[serde(rename = "id_producto_detalle")]
    pub variant_id: VariantId,
    #[serde(rename = "cantidad")]
    pub quantity: i32,
}

/// Body for `PATCH /carrito/items/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) struct QuantityUpdate {
    #[serde(rename = "cantidad")]
    pub quantity: i32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_from_backend_json() {
        let json = r#"{
            "id_carrito": 3,
            "id_usuario": 7,
            "items": [{
                "id_carrito_detalle": 11, "id_producto_detalle": 5, "id_producto": 2,
                "nombre": "Mouse", "sku": "M-1", "imagen_principal": null,
                "precio_unitario": "59.90", "cantidad": 2, "subtotal": "119.80",
                "stock_disponible": 10
            }],
            "total_items": 2,
            "subtotal": "119.80",
            "fecha_actualizacion": "2025-03-01T10:00:00Z"
        }"#;
        let cart: Cart = serde_json::from_str(json).unwrap();
        assert_eq!(cart.item_count, 2);
        assert_eq!(cart.items[0].id, CartLineId::new(11));
        assert_eq!(cart.subtotal, Decimal::new(11980, 2));
    }

    #[test]
    fn test_add_to_cart_wire_shape() {
        let body = AddToCart {
            variant_id: VariantId::new(5),
            quantity: 1,
        };
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            serde_json::json!({"id_producto_detalle": 5, "cantidad": 1})
        );
    }
}
