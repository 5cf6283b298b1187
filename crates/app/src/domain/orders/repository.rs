//! Orders Repository

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Row, Sqlite, Transaction, query, query_as, sqlite::SqliteRow};

use crate::domain::{
    catalog::records::ProductId,
    orders::{
        data::NewOrderItem,
        records::{OrderId, OrderItemRecord, OrderRecord},
    },
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const CREATE_ORDER_ITEM_SQL: &str = include_str!("sql/create_order_item.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const LIST_ORDER_ITEMS_SQL: &str = include_str!("sql/list_order_items.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteOrdersRepository;

impl SqliteOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        created_at: Timestamp,
    ) -> Result<OrderRecord, sqlx::Error> {
        query_as::<Sqlite, OrderRecord>(CREATE_ORDER_SQL)
            .bind(SqlxTimestamp::from(created_at))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_order_item(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        order: OrderId,
        item: &NewOrderItem,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_ORDER_ITEM_SQL)
            .bind(order.into_i64())
            .bind(item.product_id.into_i64())
            .bind(item.qty)
            .bind(item.price)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        query_as::<Sqlite, OrderRecord>(LIST_ORDERS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_order_items(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        order: OrderId,
    ) -> Result<Vec<OrderItemRecord>, sqlx::Error> {
        query_as::<Sqlite, OrderItemRecord>(LIST_ORDER_ITEMS_SQL)
            .bind(order.into_i64())
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, SqliteRow> for OrderRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        // Items and the derived total come from a separate query; the
        // service attaches them.
        Ok(Self {
            id: OrderId::from_i64(row.try_get("id")?),
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            items: Vec::new(),
            total: 0.0,
        })
    }
}

impl<'r> FromRow<'r, SqliteRow> for OrderItemRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        let qty: i64 = row.try_get("qty")?;
        let unit_price_snapshot: f64 = row.try_get("price")?;

        Ok(Self {
            product_id: ProductId::from_i64(row.try_get("product_id")?),
            name: row.try_get("name")?,
            qty,
            unit_price_snapshot,
            line_total: unit_price_snapshot * qty as f64,
        })
    }
}
