//! Cart

pub mod errors;
pub mod records;
pub mod service;
pub mod session;
mod summary;

pub use errors::CartServiceError;
pub use service::*;

pub(crate) use summary::summarize;
