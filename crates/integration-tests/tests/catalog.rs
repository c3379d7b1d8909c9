//! Catalog, refund, and order-management reads against the mock backend.

#![allow(clippy::unwrap_used)]

use kronos_client::loaders::OrderListQuery;
use kronos_client::models::{LoginRequest, ProductFilters, RefundRequest};
use kronos_client::{ClientStorage, ServiceError, Storefront};
use kronos_core::{OrderId, RefundId, RefundKind, VariantId};
use kronos_integration_tests::{CUSTOMER_EMAIL, CUSTOMER_PASSWORD, KEYBOARD, MockBackend};
use rust_decimal::Decimal;

async fn signed_in(backend: &MockBackend) -> Storefront {
    let app = backend.storefront(ClientStorage::memory());
    app.auth_store()
        .login(&LoginRequest::new(CUSTOMER_EMAIL, CUSTOMER_PASSWORD))
        .await
        .unwrap();
    app
}

// ========== Catalog ==========

#[tokio::test]
async fn test_families_are_cached_until_invalidated() {
    let backend = MockBackend::start().await;
    let app = backend.storefront(ClientStorage::memory());

    let first = app.catalog().families().await.unwrap();
    let second = app.catalog().families().await.unwrap();
    assert_eq!(first.len(), 2);
    assert_eq!(first, second);
    assert_eq!(backend.requests_to("/familias").len(), 1);

    app.catalog().invalidate_taxonomy();
    app.catalog().families().await.unwrap();
    assert_eq!(backend.requests_to("/familias").len(), 2);
}

#[tokio::test]
async fn test_featured_rail_asks_for_in_stock_featured_products() {
    let backend = MockBackend::start().await;
    let app = backend.storefront(ClientStorage::memory());

    let featured = app.catalog().featured(None).await.unwrap();

    assert_eq!(featured.len(), 1);
    assert_eq!(featured.first().unwrap().id, VariantId::new(KEYBOARD.id));

    let query = backend
        .requests_to("/productos")
        .first()
        .unwrap()
        .query
        .clone()
        .unwrap();
    assert!(query.contains("destacados=true"), "query {query}");
    assert!(query.contains("en_stock=true"), "query {query}");
    assert!(query.contains("limit=8"), "query {query}");
}

#[tokio::test]
async fn test_product_detail_and_missing_product() {
    let backend = MockBackend::start().await;
    let app = backend.storefront(ClientStorage::memory());

    let detail = app.catalog().product(VariantId::new(KEYBOARD.id)).await.unwrap();
    assert_eq!(detail.summary.name, KEYBOARD.name);
    assert_eq!(detail.description.as_deref(), Some("Switches rojos, retroiluminado"));

    let err = app.catalog().product(VariantId::new(99)).await.unwrap_err();
    assert!(matches!(err, ServiceError::Rejected { .. }));
    assert_eq!(err.status().map(|s| s.as_u16()), Some(404));
    assert_eq!(err.message(), "Producto no encontrado");
}

#[tokio::test]
async fn test_product_listing_refused_in_band_keeps_backend_message() {
    let backend = MockBackend::start().await;
    let app = backend.storefront(ClientStorage::memory());

    let page = app.catalog().products(&ProductFilters::default()).await.unwrap();
    assert_eq!(page.data.len(), 2);

    let err = app
        .catalog()
        .products(&ProductFilters {
            min_price: Some(Decimal::from(500)),
            max_price: Some(Decimal::from(100)),
            ..ProductFilters::default()
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Rejected { .. }));
    assert_eq!(err.status().map(|s| s.as_u16()), Some(200));
    assert_eq!(err.message(), "Rango de precios no válido");
}

// ========== Refunds ==========

fn refund(order: i32, amount: i64) -> RefundRequest {
    RefundRequest {
        order_id: OrderId::new(order),
        kind: RefundKind::Partial,
        amount: Decimal::from(amount),
        reason: "Llegó con una tecla dañada".to_owned(),
    }
}

#[tokio::test]
async fn test_refund_listing_is_bare_json() {
    let backend = MockBackend::start().await;
    let app = signed_in(&backend).await;

    let refunds = app.refunds().mine().await.unwrap();

    assert_eq!(refunds.len(), 1);
    let first = refunds.first().unwrap();
    assert_eq!(first.order_id, OrderId::new(40));
    assert_eq!(first.amount, Decimal::from(215));
}

#[tokio::test]
async fn test_refund_request_outcomes() {
    let backend = MockBackend::start().await;
    let app = signed_in(&backend).await;

    let accepted = app.refunds().request(&refund(40, 100)).await.unwrap();
    assert!(accepted.success);
    assert_eq!(accepted.refund_id, Some(RefundId::new(9)));

    // Refused in-band with a 200 status.
    let err = app.refunds().request(&refund(41, 10)).await.unwrap_err();
    assert!(matches!(err, ServiceError::Rejected { .. }));
    assert_eq!(err.status().map(|s| s.as_u16()), Some(200));
    assert_eq!(err.message(), "Pedido no elegible");

    let err = app.refunds().request(&refund(40, 300)).await.unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(400));
    assert_eq!(err.message(), "El monto excede el total del pedido");
}

// ========== Order management ==========

#[tokio::test]
async fn test_order_list_drops_catch_all_filters() {
    let backend = MockBackend::start().await;
    let app = backend.storefront(ClientStorage::memory());

    let orders = app
        .orders()
        .list(&OrderListQuery {
            status: Some("Todos".to_owned()),
            payment_status: Some("pendiente".to_owned()),
            search: Some(String::new()),
        })
        .await;

    assert_eq!(orders.len(), 1);
    assert_eq!(orders.first().unwrap().id, OrderId::new(41));
    assert_eq!(
        backend.requests_to("/ventas").first().unwrap().query.as_deref(),
        Some("estado_pago=pendiente")
    );

    let everything = app.orders().list(&OrderListQuery::default()).await;
    assert_eq!(everything.len(), 2);
}

#[tokio::test]
async fn test_order_detail_or_none() {
    let backend = MockBackend::start().await;
    let app = backend.storefront(ClientStorage::memory());

    let detail = app.orders().detail(OrderId::new(40)).await.unwrap();
    assert_eq!(detail.summary.number, "KT-000040");
    assert_eq!(detail.lines.len(), 2);
    assert_eq!(detail.tracking_number.as_deref(), Some("OLV123"));
    assert_eq!(detail.city.as_deref(), Some("Lima"));
    assert_eq!(detail.summary.total, Decimal::from(215));

    assert!(app.orders().detail(OrderId::new(99)).await.is_none());
}
