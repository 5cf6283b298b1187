//! Coupons Data

/// New Coupon Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCoupon {
    /// Code to persist, stored as provided.
    pub code: String,

    /// Percentage off, in `(0, 100]`.
    pub percent: f64,
}
