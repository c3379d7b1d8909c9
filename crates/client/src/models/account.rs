//! Customer account extras: coupons, refunds, saved payment methods.

use kronos_core::{CouponId, OrderId, PaymentMethodId, RefundId, RefundKind, SavedPaymentMethodId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Coupons
// =============================================================================

/// Coupon assigned to the current customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCoupon {
    #[serde(rename = "id_cupon")]
    pub id: CouponId,
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,
    /// `porcentaje`, `monto_fijo`, `envio_gratis`, or a backend-defined kind.
    #[serde(rename = "tipo_cupon")]
    pub kind: String,
    #[serde(rename = "valor")]
    pub value: Decimal,
    #[serde(rename = "fecha_inicio")]
    pub starts_at: String,
    #[serde(rename = "fecha_fin")]
    pub ends_at: String,
    #[serde(rename = "usos_maximos_por_usuario", default)]
    pub max_uses_per_user: Option<i32>,
    #[serde(rename = "usos_maximos_totales", default)]
    pub max_uses_total: Option<i32>,
    #[serde(rename = "usos_actuales", default)]
    pub uses_total: Option<i32>,
    #[serde(rename = "usos_usuario", default)]
    pub uses_by_user: i32,
    #[serde(rename = "usado", default)]
    pub used: bool,
    #[serde(rename = "fecha_asignacion", default)]
    pub assigned_at: String,
}

// =============================================================================
// Refunds
// =============================================================================

/// Refund request as listed under `/mis-reembolsos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Refund {
    #[serde(rename = "id_reembolso")]
    pub id: RefundId,
    #[serde(rename = "numero_pedido")]
    pub order_number: String,
    #[serde(rename = "id_venta")]
    pub order_id: OrderId,
    #[serde(rename = "nombre_cliente", default)]
    pub customer_name: Option<String>,
    #[serde(rename = "email_cliente", default)]
    pub customer_email: Option<String>,
    #[serde(rename = "tipo_reembolso")]
    pub kind: String,
    #[serde(rename = "monto_reembolsado")]
    pub amount: Decimal,
    #[serde(rename = "estado", default)]
    pub status: Option<String>,
    #[serde(rename = "fecha_solicitado", default)]
    pub requested_at: Option<String>,
}

/// Body for `POST /mis-reembolsos/solicitar`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefundRequest {
    #[serde(rename = "id_venta")]
    pub order_id: OrderId,
    #[serde(rename = "tipo_reembolso")]
    pub kind: RefundKind,
    #[serde(rename = "monto_reembolsado")]
    pub amount: Decimal,
    #[serde(rename = "motivo")]
    pub reason: String,
}

/// Bare (non-enveloped) answer to a refund request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundRequestOutcome {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(rename = "id_reembolso", default)]
    pub refund_id: Option<RefundId>,
}

// =============================================================================
// Saved payment methods
// =============================================================================

/// Tokenized payment instrument saved by the customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPaymentMethod {
    #[serde(rename = "id_metodo_pago_cliente")]
    pub id: SavedPaymentMethodId,
    #[serde(rename = "id_usuario")]
    pub user_id: UserId,
    #[serde(rename = "id_metodo_pago")]
    pub payment_method_id: PaymentMethodId,
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "token_pago", default)]
    pub payment_token: Option<String>,
    #[serde(rename = "ultimos_4_digitos", default)]
    pub last4: Option<String>,
    #[serde(rename = "marca", default)]
    pub brand: Option<String>,
    #[serde(rename = "fecha_expiracion", default)]
    pub expires: Option<String>,
    #[serde(rename = "nombre_titular", default)]
    pub holder_name: Option<String>,
    #[serde(rename = "es_predeterminado", default)]
    pub is_default: Option<bool>,
    #[serde(rename = "activo", default)]
    pub active: Option<bool>,
    #[serde(rename = "fecha_creacion", default)]
    pub created_at: Option<String>,
    #[serde(rename = "fecha_actualizacion", default)]
    pub updated_at: Option<String>,
}

/// Body for `POST /metodos-pago-cliente`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewSavedPaymentMethod {
    #[serde(rename = "id_metodo_pago")]
    pub payment_method_id: PaymentMethodId,
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "token_pago", skip_serializing_if = "Option::is_none")]
    pub payment_token: Option<String>,
    #[serde(rename = "ultimos_4_digitos", skip_serializing_if = "Option::is_none")]
    pub last4: Option<String>,
    #[serde(rename = "marca", skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(rename = "fecha_expiracion", skip_serializing_if = "Option::is_none")]
    pub expires: Option<String>,
    #[serde(rename = "nombre_titular", skip_serializing_if = "Option::is_none")]
    pub holder_name: Option<String>,
    #[serde(rename = "es_predeterminado", skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

/// Partial update for `PUT /metodos-pago-cliente/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SavedPaymentMethodUpdate {
    #[serde(rename = "ultimos_4_digitos", skip_serializing_if = "Option::is_none")]
    pub last4: Option<String>,
    #[serde(rename = "marca", skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(rename = "fecha_expiracion", skip_serializing_if = "Option::is_none")]
    pub expires: Option<String>,
    #[serde(rename = "nombre_titular", skip_serializing_if = "Option::is_none")]
    pub holder_name: Option<String>,
    #[serde(rename = "es_predeterminado", skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_refund_request_wire_shape() {
        let request = RefundRequest {
            order_id: OrderId::new(40),
            kind: RefundKind::Full,
            amount: Decimal::new(21500, 2),
            reason: "Producto defectuoso".to_owned(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["tipo_reembolso"], "total");
        assert_eq!(json["monto_reembolsado"], "215.00");
        assert_eq!(json["id_venta"], 40);
    }

    #[test]
    fn test_refund_outcome_without_id() {
        let outcome: RefundRequestOutcome =
            serde_json::from_str(r#"{"success":true,"message":"Solicitud registrada"}"#).unwrap();
        assert!(outcome.success);
        assert!(outcome.refund_id.is_none());
    }
}
