//! API configuration.

use drill_catalog_common::AppConfig;
use http::HeaderValue;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Server host to bind to
    pub host: String,

    /// Server port to bind to
    pub port: u16,

    /// CORS allowed origins
    pub cors_allowed_origins: Vec<String>,

    /// Request timeout in seconds
    pub request_timeout_seconds: u64,

    /// Enable OpenAPI documentation
    pub enable_swagger: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_allowed_origins: vec!["http://localhost:5173".to_string()],
            request_timeout_seconds: 30,
            enable_swagger: true,
        }
    }
}

impl From<&AppConfig> for ApiConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            host: config.server.host.clone(),
            port: config.server.port,
            cors_allowed_origins: config.cors.allowed_origins.clone(),
            request_timeout_seconds: config.server.request_timeout_seconds,
            enable_swagger: config.server.enable_swagger,
        }
    }
}

impl ApiConfig {
    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Get server address
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Allowed origins as header values
    pub fn cors_origins(&self) -> anyhow::Result<Vec<HeaderValue>> {
        self.cors_allowed_origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .map_err(|_| anyhow::anyhow!("Invalid CORS origin '{}'", origin))
            })
            .collect()
    }
}
