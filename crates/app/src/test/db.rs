//! Database test utilities and shared infrastructure

use sqlx::SqlitePool;
use tempfile::TempDir;

use crate::database::{self, MIGRATOR};

/// Test database configuration
///
/// Each `TestDb` instance creates a fresh `SQLite` database file inside its
/// own temporary directory, with migrations applied.
///
/// ## Isolation model
///
/// Isolation is **database-level**: every test gets its own file. Service
/// methods commit their own transactions normally, so there is no
/// auto-rollback mechanism. Tests get clean state for free from the
/// per-test database. The backing directory is removed when the `TestDb`
/// instance goes out of scope.
#[derive(Debug)]
pub struct TestDb {
    /// `SQLite` connection pool
    pub pool: SqlitePool,

    /// The URL `pool` was connected with. Stored so callers (e.g.
    /// `AppContext::from_database_url`) can open their own connections to
    /// the same file.
    url: String,

    /// Owns the database file on disk.
    _dir: TempDir,
}

impl TestDb {
    /// Create an isolated test database with migrations applied.
    pub async fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create test database directory");

        let path = dir.path().join("test.db");
        let url = format!("sqlite://{}", path.display());

        let pool = database::connect(&url)
            .await
            .expect("Failed to create pool for test database");

        MIGRATOR
            .run(&pool)
            .await
            .expect("Failed to run migrations on test database");

        Self {
            pool,
            url,
            _dir: dir,
        }
    }

    /// Returns the connection pool for this test database.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the URL the database was opened with.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn databases_start_migrated_and_queryable() {
        let test_db = TestDb::new().await;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(test_db.pool())
            .await
            .expect("Failed to query migrated schema");

        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn each_database_is_isolated() {
        let first = TestDb::new().await;
        let second = TestDb::new().await;

        sqlx::query("INSERT INTO products (name, price) VALUES ($1, $2)")
            .bind("Book")
            .bind(10.0)
            .execute(first.pool())
            .await
            .expect("Failed to insert into first database");

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(second.pool())
            .await
            .expect("Failed to query second database");

        assert_eq!(count, 0, "databases should not share state");
    }
}
