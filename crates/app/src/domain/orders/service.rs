//! Order history service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::orders::{
        errors::OrdersServiceError, records::OrderRecord, repository::SqliteOrdersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct SqliteOrdersService {
    db: Db,
    repository: SqliteOrdersRepository,
}

impl SqliteOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: SqliteOrdersRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for SqliteOrdersService {
    async fn list_orders(&self) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut orders = self.repository.list_orders(&mut tx).await?;

        for order in &mut orders {
            let items = self.repository.list_order_items(&mut tx, order.id).await?;

            order.total = items.iter().map(|item| item.line_total).sum();
            order.items = items;
        }

        tx.commit().await?;

        Ok(orders)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// List completed orders, newest first, with their items and totals.
    async fn list_orders(&self) -> Result<Vec<OrderRecord>, OrdersServiceError>;
}
