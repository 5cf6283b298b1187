//! Checkout records.

use serde::{Deserialize, Serialize};

use crate::domain::orders::records::OrderId;

/// Confirmation returned once a cart has been converted into an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutReceipt {
    /// The persisted order.
    pub order_id: OrderId,

    /// Amount charged: the cart total after any coupon discount.
    pub total: f64,
}
