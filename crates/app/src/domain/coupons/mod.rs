//! Coupons

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::CouponsServiceError;
pub use service::*;

pub(crate) use repository::SqliteCouponsRepository;
