//! Order management.

use kronos_client::Storefront;
use kronos_client::loaders::{OrderListQuery, OrderSummary};
use kronos_core::OrderId;

use crate::error::CliError;

pub async fn list(
    app: &Storefront,
    status: Option<String>,
    payment_status: Option<String>,
    search: Option<String>,
) {
    let query = OrderListQuery {
        status,
        payment_status,
        search,
    };

    let orders = app.orders().list(&query).await;
    if orders.is_empty() {
        println!("No orders found");
        return;
    }

    for order in &orders {
        print_summary(order);
    }
    println!("{} order(s)", orders.len());
}

pub async fn show(app: &Storefront, id: i32) -> Result<(), CliError> {
    let order = app
        .orders()
        .detail(OrderId::new(id))
        .await
        .ok_or_else(|| CliError::NotFound(format!("order {id}")))?;

    print_summary(&order.summary);
    if let Some(address) = &order.shipping_address {
        let city = order.city.as_deref().unwrap_or_default();
        println!("  ship to: {address}, {city}");
    }
    if let Some(tracking) = &order.tracking_number {
        println!("  tracking: {tracking}");
    }
    for line in &order.lines {
        println!(
            "  {:<12} {:<40} {:>3} x {:>10} = {:>10}",
            line.sku,
            line.product_name,
            line.quantity,
            line.unit_price.to_string(),
            line.subtotal.to_string()
        );
    }
    Ok(())
}

fn print_summary(order: &OrderSummary) {
    println!(
        "{:<14} {:<24} {:<12} {:<12} {:>10}",
        order.number,
        order.customer_name.as_deref().unwrap_or("-"),
        order.status.as_deref().unwrap_or("-"),
        order.payment_status.as_deref().unwrap_or("-"),
        order.total.to_string()
    );
}
