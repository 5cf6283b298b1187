//! Database connection management

use std::str::FromStr;

use sqlx::{Sqlite, SqlitePool, Transaction, migrate::Migrator, sqlite::SqliteConnectOptions};

/// Embedded schema migrations, applied by `db migrate` and the test databases.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

#[derive(Debug, Clone)]
pub struct Db {
    pool: SqlitePool,
}

impl Db {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Begin a transaction.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction fails.
    pub async fn begin(&self) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
        self.pool.begin().await
    }
}

/// Connect to `SQLite`, creating the database file when missing.
///
/// Foreign key enforcement is switched on for every connection in the pool.
///
/// # Errors
///
/// Returns an error if the URL is malformed or the connection cannot be
/// established.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePool::connect_with(options).await
}
