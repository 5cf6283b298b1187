//! Catalog

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::CatalogServiceError;
pub use service::*;

pub(crate) use repository::SqliteCatalogRepository;
