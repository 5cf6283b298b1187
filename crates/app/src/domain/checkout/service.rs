//! Checkout service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{Span, info};

use crate::{
    database::Db,
    domain::{
        cart::{session::CartSession, summarize},
        catalog::SqliteCatalogRepository,
        checkout::{errors::CheckoutServiceError, records::CheckoutReceipt},
        orders::{SqliteOrdersRepository, data::NewOrderItem},
    },
};

#[derive(Debug, Clone)]
pub struct SqliteCheckoutService {
    db: Db,
    session: CartSession,
    products: SqliteCatalogRepository,
    orders: SqliteOrdersRepository,
}

impl SqliteCheckoutService {
    /// Builds the service over the shared session. Pass the same session to
    /// the cart service so both operate on one cart.
    #[must_use]
    pub fn new(db: Db, session: CartSession) -> Self {
        Self {
            db,
            session,
            products: SqliteCatalogRepository::new(),
            orders: SqliteOrdersRepository::new(),
        }
    }
}

#[async_trait]
impl CheckoutService for SqliteCheckoutService {
    #[tracing::instrument(
        name = "checkout.service.checkout",
        skip(self),
        fields(
            order_id = tracing::field::Empty,
            item_count = tracing::field::Empty,
            total_charged = tracing::field::Empty,
        ),
        err
    )]
    async fn checkout(&self) -> Result<CheckoutReceipt, CheckoutServiceError> {
        // The session lock is held across the whole conversion, so no cart
        // mutation can slip in between pricing and persisting.
        let mut state = self.session.lock().await;

        if state.is_empty() {
            return Err(CheckoutServiceError::EmptyCart);
        }

        let mut tx = self.db.begin().await?;

        // Prices read inside the transaction become the order's permanent
        // snapshot; later catalog edits do not rewrite history.
        let summary = summarize(&mut tx, &self.products, &state).await?;

        let order = self.orders.create_order(&mut tx, Timestamp::now()).await?;

        for item in &summary.items {
            self.orders
                .create_order_item(
                    &mut tx,
                    order.id,
                    &NewOrderItem {
                        product_id: item.product_id,
                        qty: item.qty,
                        price: item.unit_price,
                    },
                )
                .await?;
        }

        tx.commit().await?;

        // The session is reset only once the order is durable; a failure
        // anywhere above leaves the cart intact for a retry.
        state.clear();

        let receipt = CheckoutReceipt {
            order_id: order.id,
            total: summary.total_with_discount,
        };

        let span = Span::current();
        span.record("order_id", tracing::field::display(receipt.order_id));
        span.record("item_count", tracing::field::display(summary.items.len()));
        span.record("total_charged", tracing::field::display(receipt.total));

        info!(order_id = %receipt.order_id, "checkout complete");

        Ok(receipt)
    }
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Convert the cart into a durable order and reset the session.
    ///
    /// The order row and all of its items are written in one transaction.
    /// The receipt's `total` is the amount charged, after any coupon
    /// discount.
    async fn checkout(&self) -> Result<CheckoutReceipt, CheckoutServiceError>;
}
