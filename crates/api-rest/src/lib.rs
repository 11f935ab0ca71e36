//! Drill Catalog REST API
//!
//! Axum-based HTTP surface of the drill catalog: drills, their comments and
//! ratings, plus a storage health check and OpenAPI documentation.
//!
//! ## Architecture
//!
//! - **app**: Router assembly, middleware stack and OpenAPI document
//! - **routes**: HTTP route handlers organized by resource
//! - **middleware**: Request ID and request logging
//! - **extractors**: JSON extractors that reject bad bodies with 422
//! - **responses**: Wire shapes of drills, comments and ratings
//! - **error**: HTTP error handling and conversion
//!
//! ## Usage
//!
//! ```rust,no_run
//! use drill_catalog_api_rest::{create_router, ApiConfig, AppState};
//! use drill_catalog_testing::InMemoryCatalog;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ApiConfig::default();
//!     let listener = tokio::net::TcpListener::bind(config.server_address()).await?;
//!
//!     let state = AppState::new(config, Arc::new(InMemoryCatalog::new()));
//!     axum::serve(listener, create_router(state)?).await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]

pub mod app;
pub mod config;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod responses;
pub mod routes;
pub mod state;

// Re-export commonly used types
pub use app::{create_router, ApiDoc};
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use state::AppState;
