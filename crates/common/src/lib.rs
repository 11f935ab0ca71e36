//! Shared configuration and telemetry for the drill catalog service.
//!
//! - Configuration management
//! - Telemetry and structured logging

pub mod config;
pub mod telemetry;

// Re-export commonly used types
pub use config::{AppConfig, CorsConfig, DatabaseConfig, ServerConfig, TelemetryConfig};
pub use telemetry::init_tracing;
