//! Catalog Repository

use sqlx::{FromRow, Row, Sqlite, Transaction, query_as, sqlite::SqliteRow};

use crate::domain::catalog::records::{ProductId, ProductRecord};

const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteCatalogRepository;

impl SqliteCatalogRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        name: &str,
        price: f64,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Sqlite, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(name)
            .bind(price)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        product: ProductId,
    ) -> Result<Option<ProductRecord>, sqlx::Error> {
        query_as::<Sqlite, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<Vec<ProductRecord>, sqlx::Error> {
        query_as::<Sqlite, ProductRecord>(LIST_PRODUCTS_SQL)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, SqliteRow> for ProductRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: ProductId::from_i64(row.try_get("id")?),
            name: row.try_get("name")?,
            price: row.try_get("price")?,
        })
    }
}
