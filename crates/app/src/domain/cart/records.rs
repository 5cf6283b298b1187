//! Cart Records

use serde::{Deserialize, Serialize};

use crate::domain::catalog::records::ProductId;

/// Applied Coupon
///
/// The resolved registry values attached to the cart session; at most one at
/// a time. The code carries the registry's stored casing, not what the
/// caller typed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppliedCoupon {
    pub code: String,
    pub percent: f64,
}

/// Cart Line
///
/// One priced line of the summary, resolved against the current catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: f64,
    pub qty: i64,
    pub line_total: f64,
}

/// Cart Summary
///
/// The full cart view returned by every cart operation, recomputed from live
/// catalog prices on each call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartSummary {
    /// Priced lines, one per product still resolving in the catalog.
    pub items: Vec<CartLine>,

    /// Sum of all line totals, before any discount.
    pub total: f64,

    /// The currently applied coupon, if any.
    pub coupon: Option<AppliedCoupon>,

    /// `total * percent / 100` for the applied coupon, `0` otherwise.
    pub discount: f64,

    /// `total - discount`.
    pub total_with_discount: f64,
}
