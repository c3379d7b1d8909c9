//! Cart store operations against the mock backend.

#![allow(clippy::unwrap_used)]

use kronos_client::models::LoginRequest;
use kronos_client::{ClientStorage, ServiceError, Storefront};
use kronos_core::{CartLineId, VariantId};
use kronos_integration_tests::{CUSTOMER_EMAIL, CUSTOMER_PASSWORD, KEYBOARD, MOUSE, MockBackend};
use rust_decimal::Decimal;

async fn signed_in(backend: &MockBackend) -> Storefront {
    let app = backend.storefront(ClientStorage::memory());
    app.auth_store()
        .login(&LoginRequest::new(CUSTOMER_EMAIL, CUSTOMER_PASSWORD))
        .await
        .unwrap();
    app
}

#[tokio::test]
async fn test_add_item_replaces_snapshot_with_server_totals() {
    let backend = MockBackend::start().await;
    let app = signed_in(&backend).await;
    let cart = app.cart_store();

    cart.add_item(VariantId::new(KEYBOARD.id), 2).await.unwrap();
    cart.add_item(VariantId::new(MOUSE.id), 1).await.unwrap();

    assert_eq!(cart.item_count(), 3);
    assert_eq!(cart.subtotal(), Decimal::from(360));
    let items = cart.items();
    assert_eq!(items.len(), 2);
    assert_eq!(items.first().unwrap().name, KEYBOARD.name);
    assert_eq!(items.first().unwrap().subtotal, Decimal::from(300));
    assert!(cart.error().is_none());
}

#[tokio::test]
async fn test_rejected_add_keeps_cart_and_records_message() {
    let backend = MockBackend::start().await;
    let app = signed_in(&backend).await;
    let cart = app.cart_store();

    cart.add_item(VariantId::new(KEYBOARD.id), 2).await.unwrap();
    let before = cart.cart().unwrap();

    let err = cart.add_item(VariantId::new(KEYBOARD.id), 2).await.unwrap_err();

    assert!(matches!(err, ServiceError::Rejected { .. }));
    assert_eq!(err.message(), "Stock insuficiente");
    assert_eq!(cart.error().as_deref(), Some("Stock insuficiente"));
    assert_eq!(cart.cart().unwrap(), before);

    // The next successful operation clears the error.
    cart.fetch_cart().await.unwrap();
    assert!(cart.error().is_none());
}

#[tokio::test]
async fn test_update_remove_and_clear() {
    let backend = MockBackend::start().await;
    let app = signed_in(&backend).await;
    let cart = app.cart_store();

    cart.add_item(VariantId::new(KEYBOARD.id), 1).await.unwrap();
    cart.add_item(VariantId::new(MOUSE.id), 1).await.unwrap();
    let keyboard_line = CartLineId::new(100);
    let mouse_line = CartLineId::new(101);

    cart.update_quantity(keyboard_line, 3).await.unwrap();
    assert_eq!(cart.item_count(), 4);
    assert_eq!(cart.subtotal(), Decimal::from(510));

    cart.remove_item(keyboard_line).await.unwrap();
    assert_eq!(cart.item_count(), 1);
    assert_eq!(cart.items().first().unwrap().id, mouse_line);

    let err = cart.update_quantity(mouse_line, 0).await.unwrap_err();
    assert_eq!(err.message(), "Cantidad no válida");
    assert_eq!(cart.item_count(), 1);

    cart.clear_cart().await.unwrap();
    assert_eq!(cart.item_count(), 0);
    assert!(cart.cart().unwrap().items.is_empty());
    assert!(backend.data().cart.is_empty());
}

#[tokio::test]
async fn test_anonymous_cart_fetch_is_unauthorized() {
    let backend = MockBackend::start().await;
    let app = backend.storefront(ClientStorage::memory());

    let err = app.cart_store().fetch_cart().await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(app.cart_store().error().as_deref(), Some("Token inválido o expirado"));
    assert!(app.cart_store().cart().is_none());
    assert_eq!(backend.requests_to("/carrito").first().unwrap().authorization, None);
}
