//! Test database setup.
//!
//! Connects to the PostgreSQL instance named by `TEST_DATABASE_URL`. Tests
//! using it are `#[ignore]`d and run explicitly against a disposable
//! database.

use sqlx::{postgres::PgPoolOptions, PgPool};

/// Variable holding the connection string for database tests
pub const TEST_DATABASE_URL_VAR: &str = "TEST_DATABASE_URL";

/// Test database wrapper with table cleanup
pub struct TestDatabase {
    pool: PgPool,
}

impl TestDatabase {
    /// Connect using `TEST_DATABASE_URL`.
    pub async fn from_env() -> anyhow::Result<Self> {
        let url = std::env::var(TEST_DATABASE_URL_VAR)
            .map_err(|_| anyhow::anyhow!("{} not set", TEST_DATABASE_URL_VAR))?;
        Self::new_with_url(&url).await
    }

    /// Connect to the given database.
    pub async fn new_with_url(connection_string: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;

        Ok(Self { pool })
    }

    /// Get a reference to the database pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Remove every drill; comments and ratings cascade.
    pub async fn clean(&self) -> anyhow::Result<()> {
        sqlx::query("TRUNCATE TABLE drills CASCADE")
            .execute(self.pool())
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires PostgreSQL at TEST_DATABASE_URL
    async fn test_database_connects() {
        let db = TestDatabase::from_env().await.unwrap();
        let one: i32 = sqlx::query_scalar("SELECT 1")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(one, 1);
    }
}
