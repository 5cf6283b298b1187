//! Coupons service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::coupons::{
        data::NewCoupon, errors::CouponsServiceError, records::CouponRecord,
        repository::SqliteCouponsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct SqliteCouponsService {
    db: Db,
    repository: SqliteCouponsRepository,
}

impl SqliteCouponsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: SqliteCouponsRepository::new(),
        }
    }
}

#[async_trait]
impl CouponsService for SqliteCouponsService {
    async fn lookup_coupon(&self, code: String) -> Result<CouponRecord, CouponsServiceError> {
        let mut tx = self.db.begin().await?;

        let coupon = self
            .repository
            .lookup_coupon(&mut tx, &code)
            .await?
            .ok_or(CouponsServiceError::NotFound)?;

        tx.commit().await?;

        Ok(coupon)
    }

    async fn create_coupon(&self, coupon: NewCoupon) -> Result<CouponRecord, CouponsServiceError> {
        if coupon.code.trim().is_empty() {
            return Err(CouponsServiceError::InvalidCode);
        }

        if !(coupon.percent > 0.0 && coupon.percent <= 100.0) {
            return Err(CouponsServiceError::InvalidPercent);
        }

        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_coupon(&mut tx, &coupon.code, coupon.percent)
            .await?;

        tx.commit().await?;

        Ok(created)
    }
}

#[automock]
#[async_trait]
pub trait CouponsService: Send + Sync {
    /// Retrieve the coupon for a code, compared case-insensitively.
    ///
    /// Lookup never mutates anything.
    async fn lookup_coupon(&self, code: String) -> Result<CouponRecord, CouponsServiceError>;

    /// Seeds a new coupon. Administrative operation; the cart and checkout
    /// flows only ever read coupons.
    async fn create_coupon(&self, coupon: NewCoupon) -> Result<CouponRecord, CouponsServiceError>;
}
