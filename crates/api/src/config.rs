//! HTTP server configuration.

use common::{DatabaseConfig, ServiceConfig};

/// Everything the server needs at startup.
#[derive(Debug, Clone, Default)]
pub struct ApiConfig {
    pub server: ServiceConfig,
    pub database: DatabaseConfig,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            server: ServiceConfig::from_env(),
            database: DatabaseConfig::from_env(),
        }
    }
}
