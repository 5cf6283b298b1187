//! Order write payloads.

use crate::domain::catalog::records::ProductId;

/// One line to persist for a new order.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    pub product_id: ProductId,
    pub qty: i64,

    /// Unit price at the moment of checkout.
    pub price: f64,
}
