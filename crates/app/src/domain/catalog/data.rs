//! Catalog Data

/// New Product Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    /// Display name to persist.
    pub name: String,

    /// Unit price to persist.
    pub price: f64,
}
