//! Cart service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{Span, info};

use crate::{
    database::Db,
    domain::{
        cart::{
            errors::CartServiceError,
            records::{AppliedCoupon, CartSummary},
            session::CartSession,
            summary::summarize,
        },
        catalog::{SqliteCatalogRepository, records::ProductId},
        coupons::SqliteCouponsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct SqliteCartService {
    db: Db,
    session: CartSession,
    products: SqliteCatalogRepository,
    coupons: SqliteCouponsRepository,
}

impl SqliteCartService {
    /// Builds the service over the shared session. Pass the same session to
    /// the checkout service so both operate on one cart.
    #[must_use]
    pub fn new(db: Db, session: CartSession) -> Self {
        Self {
            db,
            session,
            products: SqliteCatalogRepository::new(),
            coupons: SqliteCouponsRepository::new(),
        }
    }
}

#[async_trait]
impl CartService for SqliteCartService {
    async fn summary(&self) -> Result<CartSummary, CartServiceError> {
        let state = self.session.lock().await;
        let mut tx = self.db.begin().await?;

        let summary = summarize(&mut tx, &self.products, &state).await?;

        tx.commit().await?;

        Ok(summary)
    }

    async fn add_item(
        &self,
        product: ProductId,
        qty: i64,
    ) -> Result<CartSummary, CartServiceError> {
        if qty <= 0 {
            return Err(CartServiceError::InvalidQuantity);
        }

        let mut state = self.session.lock().await;
        let mut tx = self.db.begin().await?;

        if self.products.get_product(&mut tx, product).await?.is_none() {
            return Err(CartServiceError::ProductNotFound);
        }

        // Mutations are staged on a copy and swapped in only after the
        // transaction commits, so a storage failure leaves the cart as it
        // was and a retry is safe.
        let mut staged = state.clone();
        let line = staged.lines.entry(product).or_insert(0);
        *line = line
            .checked_add(qty)
            .ok_or(CartServiceError::InvalidQuantity)?;

        let summary = summarize(&mut tx, &self.products, &staged).await?;

        tx.commit().await?;

        *state = staged;

        Ok(summary)
    }

    async fn set_quantity(
        &self,
        product: ProductId,
        qty: i64,
    ) -> Result<CartSummary, CartServiceError> {
        if qty <= 0 {
            return Err(CartServiceError::InvalidQuantity);
        }

        let mut state = self.session.lock().await;

        if !state.lines.contains_key(&product) {
            return Err(CartServiceError::LineNotFound);
        }

        let mut staged = state.clone();
        staged.lines.insert(product, qty);

        let mut tx = self.db.begin().await?;

        let summary = summarize(&mut tx, &self.products, &staged).await?;

        tx.commit().await?;

        *state = staged;

        Ok(summary)
    }

    async fn remove_item(&self, product: ProductId) -> Result<CartSummary, CartServiceError> {
        let mut state = self.session.lock().await;

        let mut staged = state.clone();

        if staged.lines.remove(&product).is_none() {
            return Err(CartServiceError::LineNotFound);
        }

        let mut tx = self.db.begin().await?;

        let summary = summarize(&mut tx, &self.products, &staged).await?;

        tx.commit().await?;

        *state = staged;

        Ok(summary)
    }

    #[tracing::instrument(
        name = "cart.service.apply_coupon",
        skip(self, code),
        fields(code = tracing::field::Empty, percent = tracing::field::Empty),
        err
    )]
    async fn apply_coupon(&self, code: String) -> Result<CartSummary, CartServiceError> {
        let code = code.trim();

        if code.is_empty() {
            return Err(CartServiceError::InvalidCoupon);
        }

        let span = Span::current();
        span.record("code", tracing::field::display(code));

        let mut state = self.session.lock().await;
        let mut tx = self.db.begin().await?;

        let Some(coupon) = self.coupons.lookup_coupon(&mut tx, code).await? else {
            // A registry miss drops whatever was applied before; a failed
            // re-apply never leaves a stale discount behind.
            state.coupon = None;
            return Err(CartServiceError::CouponNotFound);
        };

        span.record("percent", tracing::field::display(coupon.percent));

        let mut staged = state.clone();
        staged.coupon = Some(AppliedCoupon {
            code: coupon.code,
            percent: coupon.percent,
        });

        let summary = summarize(&mut tx, &self.products, &staged).await?;

        tx.commit().await?;

        *state = staged;

        info!(discount = summary.discount, "applied coupon to cart");

        Ok(summary)
    }
}

#[automock]
#[async_trait]
pub trait CartService: Send + Sync {
    /// Price the cart against the current catalog.
    async fn summary(&self) -> Result<CartSummary, CartServiceError>;

    /// Add `qty` of a product, adding to any existing line for it.
    async fn add_item(
        &self,
        product: ProductId,
        qty: i64,
    ) -> Result<CartSummary, CartServiceError>;

    /// Replace the quantity of an existing line.
    async fn set_quantity(
        &self,
        product: ProductId,
        qty: i64,
    ) -> Result<CartSummary, CartServiceError>;

    /// Delete a line entirely.
    async fn remove_item(&self, product: ProductId) -> Result<CartSummary, CartServiceError>;

    /// Resolve a code against the registry and attach it to the cart,
    /// replacing any previously applied coupon.
    async fn apply_coupon(&self, code: String) -> Result<CartSummary, CartServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::{
        TestContext,
        helpers::{create_coupon, create_product},
    };

    use super::*;

    #[tokio::test]
    async fn summary_of_empty_cart_is_empty() -> TestResult {
        let ctx = TestContext::new().await;

        let summary = ctx.cart.summary().await?;

        assert!(summary.items.is_empty(), "expected no items");
        assert_eq!(summary.total, 0.0);
        assert!(summary.coupon.is_none(), "expected no coupon");
        assert_eq!(summary.total_with_discount, 0.0);

        Ok(())
    }

    #[tokio::test]
    async fn add_item_creates_a_priced_line() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "Book", 10.0).await?;

        let summary = ctx.cart.add_item(product.id, 2).await?;

        assert_eq!(summary.items.len(), 1, "expected one line");
        assert_eq!(summary.items[0].product_id, product.id);
        assert_eq!(summary.items[0].name, "Book");
        assert_eq!(summary.items[0].unit_price, 10.0);
        assert_eq!(summary.items[0].qty, 2);
        assert_eq!(summary.items[0].line_total, 20.0);
        assert_eq!(summary.total, 20.0);
        assert_eq!(summary.total_with_discount, 20.0);

        Ok(())
    }

    #[tokio::test]
    async fn add_item_accumulates_quantity_on_the_same_line() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "Book", 10.0).await?;

        ctx.cart.add_item(product.id, 2).await?;
        let summary = ctx.cart.add_item(product.id, 3).await?;

        assert_eq!(summary.items.len(), 1, "expected a single merged line");
        assert_eq!(summary.items[0].qty, 5);
        assert_eq!(summary.total, 50.0);

        Ok(())
    }

    #[tokio::test]
    async fn add_item_totals_span_multiple_lines() -> TestResult {
        let ctx = TestContext::new().await;
        let book = create_product(&ctx, "Book", 10.0).await?;
        let pen = create_product(&ctx, "Pen", 2.5).await?;

        ctx.cart.add_item(book.id, 1).await?;
        let summary = ctx.cart.add_item(pen.id, 4).await?;

        assert_eq!(summary.items.len(), 2, "expected two lines");
        assert_eq!(summary.total, 20.0);

        Ok(())
    }

    #[tokio::test]
    async fn add_item_rejects_non_positive_quantity() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "Book", 10.0).await?;

        for qty in [0, -3] {
            let result = ctx.cart.add_item(product.id, qty).await;

            assert!(
                matches!(result, Err(CartServiceError::InvalidQuantity)),
                "expected InvalidQuantity for {qty}, got {result:?}"
            );
        }

        let summary = ctx.cart.summary().await?;
        assert!(summary.items.is_empty(), "cart should be untouched");

        Ok(())
    }

    #[tokio::test]
    async fn add_item_unknown_product_returns_product_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx.cart.add_item(ProductId::from_i64(42), 1).await;

        assert!(
            matches!(result, Err(CartServiceError::ProductNotFound)),
            "expected ProductNotFound, got {result:?}"
        );

        let summary = ctx.cart.summary().await?;
        assert!(summary.items.is_empty(), "cart should be untouched");

        Ok(())
    }

    #[tokio::test]
    async fn set_quantity_replaces_rather_than_adds() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "Book", 10.0).await?;

        ctx.cart.add_item(product.id, 2).await?;
        let summary = ctx.cart.set_quantity(product.id, 7).await?;

        assert_eq!(summary.items[0].qty, 7);
        assert_eq!(summary.total, 70.0);

        Ok(())
    }

    #[tokio::test]
    async fn set_quantity_without_a_line_returns_line_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "Book", 10.0).await?;

        let result = ctx.cart.set_quantity(product.id, 3).await;

        assert!(
            matches!(result, Err(CartServiceError::LineNotFound)),
            "expected LineNotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn set_quantity_rejects_non_positive_quantity() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "Book", 10.0).await?;

        ctx.cart.add_item(product.id, 2).await?;

        for qty in [0, -1] {
            let result = ctx.cart.set_quantity(product.id, qty).await;

            assert!(
                matches!(result, Err(CartServiceError::InvalidQuantity)),
                "expected InvalidQuantity for {qty}, got {result:?}"
            );
        }

        // A rejected update never stores a zero or negative quantity.
        let summary = ctx.cart.summary().await?;
        assert_eq!(summary.items[0].qty, 2);

        Ok(())
    }

    #[tokio::test]
    async fn remove_item_deletes_the_line() -> TestResult {
        let ctx = TestContext::new().await;
        let book = create_product(&ctx, "Book", 10.0).await?;
        let pen = create_product(&ctx, "Pen", 2.5).await?;

        ctx.cart.add_item(book.id, 1).await?;
        ctx.cart.add_item(pen.id, 2).await?;

        let summary = ctx.cart.remove_item(book.id).await?;

        assert_eq!(summary.items.len(), 1, "expected one remaining line");
        assert_eq!(summary.items[0].product_id, pen.id);
        assert_eq!(summary.total, 5.0);

        Ok(())
    }

    #[tokio::test]
    async fn remove_item_without_a_line_returns_line_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.cart.remove_item(ProductId::from_i64(1)).await;

        assert!(
            matches!(result, Err(CartServiceError::LineNotFound)),
            "expected LineNotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn apply_coupon_discounts_the_total() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "Book", 10.0).await?;
        create_coupon(&ctx, "PROMO10", 10.0).await?;

        ctx.cart.add_item(product.id, 2).await?;
        let summary = ctx.cart.apply_coupon("PROMO10".to_string()).await?;

        assert_eq!(summary.total, 20.0);
        assert_eq!(summary.discount, 2.0);
        assert_eq!(summary.total_with_discount, 18.0);

        let coupon = summary.coupon.as_ref().expect("coupon should be applied");
        assert_eq!(coupon.code, "PROMO10");
        assert_eq!(coupon.percent, 10.0);

        Ok(())
    }

    #[tokio::test]
    async fn apply_coupon_matches_codes_case_insensitively() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "Book", 10.0).await?;
        create_coupon(&ctx, "PROMO10", 10.0).await?;

        ctx.cart.add_item(product.id, 1).await?;
        let summary = ctx.cart.apply_coupon("promo10".to_string()).await?;

        let coupon = summary.coupon.as_ref().expect("coupon should be applied");
        assert_eq!(coupon.code, "PROMO10", "stored casing should be reported");

        Ok(())
    }

    #[tokio::test]
    async fn apply_coupon_blank_code_returns_invalid_coupon() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "Book", 10.0).await?;
        create_coupon(&ctx, "PROMO10", 10.0).await?;

        ctx.cart.add_item(product.id, 1).await?;
        ctx.cart.apply_coupon("PROMO10".to_string()).await?;

        for code in ["", "   "] {
            let result = ctx.cart.apply_coupon(code.to_string()).await;

            assert!(
                matches!(result, Err(CartServiceError::InvalidCoupon)),
                "expected InvalidCoupon for {code:?}, got {result:?}"
            );
        }

        // Validation failures happen before any mutation: the coupon that
        // was applied earlier survives.
        let summary = ctx.cart.summary().await?;
        assert!(summary.coupon.is_some(), "applied coupon should survive");

        Ok(())
    }

    #[tokio::test]
    async fn apply_coupon_unknown_code_clears_the_previous_coupon() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "Book", 10.0).await?;
        create_coupon(&ctx, "PROMO10", 10.0).await?;

        ctx.cart.add_item(product.id, 2).await?;
        ctx.cart.apply_coupon("PROMO10".to_string()).await?;

        let result = ctx.cart.apply_coupon("MISSING".to_string()).await;

        assert!(
            matches!(result, Err(CartServiceError::CouponNotFound)),
            "expected CouponNotFound, got {result:?}"
        );

        let summary = ctx.cart.summary().await?;
        assert!(summary.coupon.is_none(), "previous coupon should be gone");
        assert_eq!(summary.total_with_discount, 20.0);

        Ok(())
    }

    #[tokio::test]
    async fn apply_coupon_replaces_rather_than_stacks() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "Book", 10.0).await?;
        create_coupon(&ctx, "PROMO10", 10.0).await?;
        create_coupon(&ctx, "PROMO50", 50.0).await?;

        ctx.cart.add_item(product.id, 2).await?;
        ctx.cart.apply_coupon("PROMO10".to_string()).await?;
        let summary = ctx.cart.apply_coupon("PROMO50".to_string()).await?;

        let coupon = summary.coupon.as_ref().expect("coupon should be applied");
        assert_eq!(coupon.code, "PROMO50");
        assert_eq!(summary.discount, 10.0);
        assert_eq!(summary.total_with_discount, 10.0);

        Ok(())
    }

    #[tokio::test]
    async fn discount_is_recomputed_as_the_cart_changes() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "Book", 10.0).await?;
        create_coupon(&ctx, "PROMO10", 10.0).await?;

        ctx.cart.add_item(product.id, 1).await?;
        let before = ctx.cart.apply_coupon("PROMO10".to_string()).await?;
        assert_eq!(before.discount, 1.0);

        let after = ctx.cart.add_item(product.id, 1).await?;

        assert_eq!(after.total, 20.0);
        assert_eq!(after.discount, 2.0);
        assert_eq!(after.total_with_discount, 18.0);

        Ok(())
    }

    #[tokio::test]
    async fn summary_skips_lines_whose_product_disappeared() -> TestResult {
        let ctx = TestContext::new().await;
        let book = create_product(&ctx, "Book", 10.0).await?;
        let pen = create_product(&ctx, "Pen", 2.5).await?;

        ctx.cart.add_item(book.id, 1).await?;
        ctx.cart.add_item(pen.id, 2).await?;

        // Remove a product out-of-band; the subsystem itself has no delete.
        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(book.id.into_i64())
            .execute(ctx.db.pool())
            .await?;

        let summary = ctx.cart.summary().await?;

        assert_eq!(summary.items.len(), 1, "missing product should be skipped");
        assert_eq!(summary.items[0].product_id, pen.id);
        assert_eq!(summary.total, 5.0);

        Ok(())
    }

    #[tokio::test]
    async fn add_item_rejects_quantity_overflow() -> TestResult {
        let ctx = TestContext::new().await;
        let product = create_product(&ctx, "Book", 10.0).await?;

        ctx.cart.add_item(product.id, i64::MAX).await?;
        let result = ctx.cart.add_item(product.id, 1).await;

        assert!(
            matches!(result, Err(CartServiceError::InvalidQuantity)),
            "expected InvalidQuantity, got {result:?}"
        );

        let summary = ctx.cart.summary().await?;
        assert_eq!(summary.items[0].qty, i64::MAX, "line should be untouched");

        Ok(())
    }

    #[tokio::test]
    async fn remove_item_storage_failure_leaves_the_cart_unchanged() -> TestResult {
        let ctx = TestContext::new().await;
        let book = create_product(&ctx, "Book", 10.0).await?;
        let pen = create_product(&ctx, "Pen", 2.5).await?;

        ctx.cart.add_item(book.id, 1).await?;
        ctx.cart.add_item(pen.id, 2).await?;

        // Yank the table out from under the operation to force a storage
        // failure mid-remove.
        sqlx::query("ALTER TABLE products RENAME TO products_hidden")
            .execute(ctx.db.pool())
            .await?;

        let result = ctx.cart.remove_item(book.id).await;

        assert!(
            matches!(result, Err(CartServiceError::Sql(_))),
            "expected Sql, got {result:?}"
        );

        sqlx::query("ALTER TABLE products_hidden RENAME TO products")
            .execute(ctx.db.pool())
            .await?;

        // The failed remove left the line in place, so a retry succeeds.
        let summary = ctx.cart.summary().await?;
        assert_eq!(summary.items.len(), 2, "both lines should survive");

        let retried = ctx.cart.remove_item(book.id).await?;
        assert_eq!(retried.items.len(), 1);
        assert_eq!(retried.items[0].product_id, pen.id);

        Ok(())
    }

    #[tokio::test]
    async fn add_item_validates_quantity_before_product_existence() {
        let ctx = TestContext::new().await;

        // Both arguments are invalid; quantity wins.
        let result = ctx.cart.add_item(ProductId::from_i64(42), 0).await;

        assert!(
            matches!(result, Err(CartServiceError::InvalidQuantity)),
            "expected InvalidQuantity, got {result:?}"
        );
    }
}
