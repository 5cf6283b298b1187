//! Cart service errors.

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartServiceError {
    #[error("quantity must be a positive integer")]
    InvalidQuantity,

    #[error("product not found")]
    ProductNotFound,

    #[error("no cart line for that product")]
    LineNotFound,

    #[error("coupon code cannot be empty")]
    InvalidCoupon,

    #[error("coupon not found")]
    CouponNotFound,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CartServiceError {
    fn from(error: Error) -> Self {
        Self::Sql(error)
    }
}
