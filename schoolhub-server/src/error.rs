//! Startup error types for schoolhub-server

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StartupError>;

/// Anything that stops the service from coming up. All of these are fatal.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("DB_URL is not defined in environment variables")]
    MissingDatabaseUrl,

    #[error("invalid database URL: {0}")]
    InvalidDatabaseUrl(#[source] sqlx::Error),

    #[error("database connection failed: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("failed to ensure schools table: {0}")]
    Migrate(#[source] sqlx::Error),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
