//! Orders

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::OrdersServiceError;
pub use service::*;

pub(crate) use repository::SqliteOrdersRepository;
