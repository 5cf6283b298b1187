//! Order history records.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{domain::catalog::records::ProductId, ids::TypedId};

pub type OrderId = TypedId<OrderRecord>;

/// A completed order, reconstructed from storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Order ID.
    pub id: OrderId,

    /// When the order was placed.
    pub created_at: Timestamp,

    /// The order's lines, in insertion order.
    pub items: Vec<OrderItemRecord>,

    /// Sum of the line totals. Recomputed from the persisted quantities and
    /// price snapshots, so any coupon discount applied at checkout is not
    /// reflected here.
    pub total: f64,
}

/// One line of a completed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemRecord {
    /// Product the line refers to.
    pub product_id: ProductId,

    /// Product name as the catalog has it now, not as it was at checkout.
    pub name: String,

    /// Units ordered.
    pub qty: i64,

    /// Unit price captured at checkout time.
    pub unit_price_snapshot: f64,

    /// `qty * unit_price_snapshot`.
    pub line_total: f64,
}
