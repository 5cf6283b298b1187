//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        cart::{CartService, SqliteCartService, session::CartSession},
        catalog::{CatalogService, SqliteCatalogService},
        checkout::{CheckoutService, SqliteCheckoutService},
        coupons::{CouponsService, SqliteCouponsService},
        orders::{OrdersService, SqliteOrdersService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub catalog: Arc<dyn CatalogService>,
    pub coupons: Arc<dyn CouponsService>,
    pub cart: Arc<dyn CartService>,
    pub checkout: Arc<dyn CheckoutService>,
    pub orders: Arc<dyn OrdersService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// The cart and checkout services are wired over one shared session, so
    /// the cart a caller fills is the cart checkout converts.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(url: &str) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool);
        let session = CartSession::new();

        Ok(Self {
            catalog: Arc::new(SqliteCatalogService::new(db.clone())),
            coupons: Arc::new(SqliteCouponsService::new(db.clone())),
            cart: Arc::new(SqliteCartService::new(db.clone(), session.clone())),
            checkout: Arc::new(SqliteCheckoutService::new(db.clone(), session)),
            orders: Arc::new(SqliteOrdersService::new(db)),
        })
    }
}
