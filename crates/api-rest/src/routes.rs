//! HTTP route handlers.
//!
//! This module organizes all API endpoints by resource.

pub mod comments;
pub mod drills;
pub mod health;
pub mod ratings;

use crate::state::AppState;
use axum::Router;

/// Every resource route of the catalog
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(drills::routes())
        .merge(comments::routes())
        .merge(ratings::routes())
}
