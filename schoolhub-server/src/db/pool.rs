//! Database connection pool management
//!
//! Uses sqlx PgPool with an explicit connection limit. Callers that cannot
//! get a connection wait in the pool's queue; nothing is rejected.

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;

use crate::config::DbConfig;
use crate::error::StartupError;

/// How long a caller may wait for a free connection.
///
/// Effectively unbounded. sqlx adds this to `Instant::now()`, so it must
/// stay finite rather than `Duration::MAX`.
pub const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(u32::MAX as u64);

/// Connection options for `config`, with `sslmode=require` unless the URL
/// sets its own mode.
pub fn connect_options(config: &DbConfig) -> Result<PgConnectOptions, StartupError> {
    let options =
        PgConnectOptions::from_str(&config.database_url).map_err(StartupError::InvalidDatabaseUrl)?;
    if config.has_explicit_ssl_mode() {
        Ok(options)
    } else {
        Ok(options.ssl_mode(PgSslMode::Require))
    }
}

/// Pool limits: `max_connections` from `config`, queued waiters never time out.
pub fn pool_options(config: &DbConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
}

/// Create a PostgreSQL connection pool and prove it can serve a query.
///
/// Unless the URL names its own `sslmode`, connections require TLS but do
/// not verify the server certificate.
///
/// # Errors
///
/// Returns [`StartupError::InvalidDatabaseUrl`] if the URL cannot be parsed
/// and [`StartupError::Connect`] if the server is unreachable.
///
/// # Example
///
/// ```ignore
/// let config = DbConfig::from_env()?;
/// let pool = create_pool(&config).await?;
/// ```
pub async fn create_pool(config: &DbConfig) -> Result<PgPool, StartupError> {
    let pool = pool_options(config)
        .connect_with(connect_options(config)?)
        .await
        .map_err(StartupError::Connect)?;

    verify_connection(&pool).await?;
    Ok(pool)
}

/// Check out one connection, run a trivial query, and hand it back.
pub async fn verify_connection(pool: &PgPool) -> Result<(), StartupError> {
    let mut conn = pool.acquire().await.map_err(StartupError::Connect)?;
    sqlx::query("SELECT 1")
        .execute(&mut *conn)
        .await
        .map_err(StartupError::Connect)?;

    tracing::info!(
        max_connections = pool.options().get_max_connections(),
        "Database connected successfully"
    );
    Ok(())
}
