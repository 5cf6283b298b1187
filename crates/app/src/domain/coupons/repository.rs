//! Coupons Repository

use sqlx::{FromRow, Row, Sqlite, Transaction, query_as, sqlite::SqliteRow};

use crate::domain::coupons::records::CouponRecord;

const CREATE_COUPON_SQL: &str = include_str!("sql/create_coupon.sql");
const LOOKUP_COUPON_SQL: &str = include_str!("sql/lookup_coupon.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteCouponsRepository;

impl SqliteCouponsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_coupon(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        code: &str,
        percent: f64,
    ) -> Result<CouponRecord, sqlx::Error> {
        query_as::<Sqlite, CouponRecord>(CREATE_COUPON_SQL)
            .bind(code)
            .bind(percent)
            .fetch_one(&mut **tx)
            .await
    }

    /// Case-insensitive lookup; the `coupons.code` column collates `NOCASE`,
    /// so the canonicalisation lives at the storage boundary.
    pub(crate) async fn lookup_coupon(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        code: &str,
    ) -> Result<Option<CouponRecord>, sqlx::Error> {
        query_as::<Sqlite, CouponRecord>(LOOKUP_COUPON_SQL)
            .bind(code)
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, SqliteRow> for CouponRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            code: row.try_get("code")?,
            percent: row.try_get("percent")?,
        })
    }
}
