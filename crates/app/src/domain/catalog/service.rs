//! Catalog service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::catalog::{
        data::NewProduct,
        errors::CatalogServiceError,
        records::{ProductId, ProductRecord},
        repository::SqliteCatalogRepository,
    },
};

#[derive(Debug, Clone)]
pub struct SqliteCatalogService {
    db: Db,
    repository: SqliteCatalogRepository,
}

impl SqliteCatalogService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: SqliteCatalogRepository::new(),
        }
    }
}

#[async_trait]
impl CatalogService for SqliteCatalogService {
    async fn list_products(&self) -> Result<Vec<ProductRecord>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let products = self.repository.list_products(&mut tx).await?;

        tx.commit().await?;

        Ok(products)
    }

    async fn get_product(&self, product: ProductId) -> Result<ProductRecord, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self
            .repository
            .get_product(&mut tx, product)
            .await?
            .ok_or(CatalogServiceError::NotFound)?;

        tx.commit().await?;

        Ok(product)
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, CatalogServiceError> {
        // Both checks happen before anything is written.
        if product.name.is_empty() {
            return Err(CatalogServiceError::InvalidName);
        }

        if !product.price.is_finite() || product.price < 0.0 {
            return Err(CatalogServiceError::InvalidPrice);
        }

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_product(&mut tx, &product.name, product.price)
            .await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Retrieves all products, ordered by id ascending.
    async fn list_products(&self) -> Result<Vec<ProductRecord>, CatalogServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductId) -> Result<ProductRecord, CatalogServiceError>;

    /// Creates a new product with the given name and price.
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, CatalogServiceError>;
}
