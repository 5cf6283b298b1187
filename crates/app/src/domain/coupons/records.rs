//! Coupon Records

use serde::{Deserialize, Serialize};

/// Coupon Record
///
/// The code round-trips exactly as stored; only lookups are
/// case-insensitive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponRecord {
    /// Discount code, unique case-insensitively.
    pub code: String,

    /// Percentage taken off the cart total, in `(0, 100]`.
    pub percent: f64,
}
