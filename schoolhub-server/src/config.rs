//! Service configuration - environment loading
//!
//! Configuration is loaded from environment variables:
//! - `DB_URL`: PostgreSQL connection URL (required)

use std::net::SocketAddr;

use crate::error::StartupError;

/// Environment variable holding the database URL
pub const DB_URL_VAR: &str = "DB_URL";

/// Pool size used when nothing else is configured
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Fixed listen port unless overridden
pub const DEFAULT_PORT: u16 = 8080;

/// Storage client configuration
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub database_url: String,
    pub max_connections: u32,
}

impl DbConfig {
    /// Read `DB_URL` from the environment. Absent or blank is an error.
    pub fn from_env() -> Result<Self, StartupError> {
        let database_url = std::env::var(DB_URL_VAR).unwrap_or_default();
        Self::new(database_url)
    }

    /// Create config with an explicit URL (for testing)
    pub fn new(database_url: impl Into<String>) -> Result<Self, StartupError> {
        let database_url = database_url.into();
        if database_url.trim().is_empty() {
            return Err(StartupError::MissingDatabaseUrl);
        }
        Ok(Self {
            database_url,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        })
    }

    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections.max(1);
        self
    }

    /// Whether the URL pins its own TLS mode
    pub fn has_explicit_ssl_mode(&self) -> bool {
        self.database_url.contains("sslmode=")
    }
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:8080)
    pub bind_addr: SocketAddr,

    /// Allow any origin (default: true)
    ///
    /// When false, only localhost origins on the bound port are allowed.
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            cors_permissive: true,
        }
    }
}
