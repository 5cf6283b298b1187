//! Till Domain Concerns

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod coupons;
pub mod orders;
