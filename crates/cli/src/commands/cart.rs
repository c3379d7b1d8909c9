//! Cart of the signed-in user.

use kronos_client::Storefront;
use kronos_client::models::Cart;
use kronos_core::VariantId;

use super::session::signed_in;
use crate::error::CliError;

pub async fn show(app: &Storefront) -> Result<(), CliError> {
    signed_in(app).await?;
    let cart = app.cart_store().fetch_cart().await?;
    print_cart(&cart);
    Ok(())
}

pub async fn add(app: &Storefront, variant_id: i32, quantity: i32) -> Result<(), CliError> {
    if quantity < 1 {
        return Err(CliError::InvalidArgument(format!(
            "quantity must be at least 1, got {quantity}"
        )));
    }

    signed_in(app).await?;
    let cart = app
        .cart_store()
        .add_item(VariantId::new(variant_id), quantity)
        .await?;
    print_cart(&cart);
    Ok(())
}

pub async fn clear(app: &Storefront) -> Result<(), CliError> {
    signed_in(app).await?;
    app.cart_store().clear_cart().await?;
    println!("Cart cleared");
    Ok(())
}

fn print_cart(cart: &Cart) {
    if cart.items.is_empty() {
        println!("Cart is empty");
        return;
    }

    for item in &cart.items {
        println!(
            "{:>6}  {:<40} {:>3} x {:>10} = {:>10}",
            item.id.as_i32(),
            item.name,
            item.quantity,
            item.unit_price.to_string(),
            item.subtotal.to_string()
        );
    }
    println!("{} item(s), subtotal {}", cart.item_count, cart.subtotal);
}
