//! PostgreSQL connection pool.

use async_trait::async_trait;
use drill_catalog_application::{ApplicationError, ApplicationResult, HealthCheckPort};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

use crate::{Error, Result};

/// Connections idle longer than this are closed.
const IDLE_TIMEOUT: Duration = Duration::from_secs(600);
/// Connections are recycled after this long regardless of use.
const MAX_LIFETIME: Duration = Duration::from_secs(1800);

/// Pool sizing and connection target.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    /// Take pool settings from the loaded application configuration.
    pub fn from_settings(settings: &drill_catalog_common::DatabaseConfig) -> Result<Self> {
        let url = settings.url.trim();
        if url.is_empty() {
            return Err(Error::Configuration("DATABASE_URL not set".to_string()));
        }

        Ok(Self {
            url: url.to_string(),
            max_connections: settings.max_connections,
            min_connections: settings.min_connections,
            acquire_timeout: Duration::from_secs(settings.acquire_timeout_seconds),
        })
    }
}

/// Shared handle to the catalog database.
#[derive(Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Open the pool. Every connection runs in UTC so stored timestamps
    /// come back unshifted.
    #[instrument(skip(config), fields(max_connections = config.max_connections))]
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(Some(IDLE_TIMEOUT))
            .max_lifetime(Some(MAX_LIFETIME))
            .after_connect(|conn, _meta| {
                Box::pin(async move {
                    sqlx::query("SET timezone = 'UTC'").execute(&mut *conn).await?;
                    Ok(())
                })
            })
            .connect(&config.url)
            .await?;

        info!(size = pool.size(), "Database pool ready");
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    #[inline]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Round-trip a trivial query and report how long it took.
    pub async fn round_trip(&self) -> Result<Duration> {
        let started = Instant::now();
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(started.elapsed())
    }

    pub async fn close(&self) {
        info!("Closing database pool");
        self.pool.close().await;
    }
}

#[async_trait]
impl HealthCheckPort for DatabasePool {
    async fn ping(&self) -> ApplicationResult<()> {
        match self.round_trip().await {
            Ok(latency) => {
                debug!(latency_ms = latency.as_millis() as u64, "Database reachable");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "Database unreachable");
                Err(ApplicationError::ServiceUnavailable(err.to_string()))
            }
        }
    }
}

impl std::fmt::Debug for DatabasePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabasePool")
            .field("size", &self.pool.size())
            .field("idle", &self.pool.num_idle())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_settings() {
        let mut settings = drill_catalog_common::DatabaseConfig::default();
        assert!(matches!(
            DatabaseConfig::from_settings(&settings),
            Err(Error::Configuration(_))
        ));

        settings.url = " postgres://localhost/drills ".to_string();
        settings.max_connections = 20;
        settings.acquire_timeout_seconds = 2;
        let config = DatabaseConfig::from_settings(&settings).unwrap();
        assert_eq!(config.url, "postgres://localhost/drills");
        assert_eq!(config.max_connections, 20);
        assert_eq!(config.min_connections, 1);
        assert_eq!(config.acquire_timeout, Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_unreachable_database_is_unavailable() {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(200))
            .connect_lazy("postgres://nobody@127.0.0.1:1/none")
            .unwrap();
        let err = DatabasePool::from_pool(pool).ping().await.unwrap_err();
        assert_eq!(err.error_code(), "SERVICE_UNAVAILABLE");
    }
}
