//! Drill Catalog API server
//!
//! Loads configuration, prepares the database schema and serves the REST API
//! until interrupted.

use anyhow::{Context, Result};
use drill_catalog_api_rest::{create_router, ApiConfig, AppState};
use drill_catalog_application::{CommentService, DrillService, RatingService};
use drill_catalog_common::{init_tracing, AppConfig};
use drill_catalog_infrastructure::{
    schema, DatabaseConfig, DatabasePool, PgCommentRepository, PgDrillRepository,
    PgRatingRepository,
};
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.telemetry)?;

    info!(
        address = %config.server_address(),
        origins = ?config.cors.allowed_origins,
        "Starting drill catalog API"
    );

    let database = DatabaseConfig::from_settings(&config.database)?;
    let pool = DatabasePool::new(&database)
        .await
        .context("Failed to connect to database")?;
    schema::ensure_schema(pool.pool())
        .await
        .context("Failed to prepare database schema")?;

    let drills = Arc::new(PgDrillRepository::new(pool.pool().clone()));
    let comments = Arc::new(PgCommentRepository::new(pool.pool().clone()));
    let ratings = Arc::new(PgRatingRepository::new(pool.pool().clone()));

    let api_config = ApiConfig::from(&config);
    let state = AppState::with_services(
        api_config.clone(),
        DrillService::new(drills.clone()),
        CommentService::new(comments, drills.clone()),
        RatingService::new(ratings, drills),
        Arc::new(pool.clone()),
    );
    let app = create_router(state)?;

    let listener = tokio::net::TcpListener::bind(api_config.server_address())
        .await
        .with_context(|| format!("Failed to bind {}", api_config.server_address()))?;

    info!(address = %api_config.server_address(), "Server ready");
    if api_config.enable_swagger {
        info!("Swagger UI available at /swagger-ui");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool.close().await;
    info!("Server shut down gracefully");

    Ok(())
}

/// Resolve on Ctrl+C or, on Unix, SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Received shutdown signal");
}
