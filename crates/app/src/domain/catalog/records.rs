//! Catalog Records

use serde::{Deserialize, Serialize};

use crate::ids::TypedId;

/// Product Id
pub type ProductId = TypedId<ProductRecord>;

/// Product Record
///
/// Products are immutable once created; there is no update or delete
/// operation on the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Generated row id.
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Unit price.
    pub price: f64,
}
