//! Page data loaders.
//!
//! Loaders fetch what a single page needs to render. They are independent
//! of the stores and never surface errors.

mod orders;

pub use orders::{OrderDetail, OrderDetailLine, OrderListQuery, OrderSummary, OrdersLoader};
