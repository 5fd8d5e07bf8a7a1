//! Schema bootstrap for the schools table

use sqlx::PgPool;

use crate::error::StartupError;

const CREATE_SCHOOLS: &str = r#"
    CREATE TABLE IF NOT EXISTS schools (
        id SERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        address VARCHAR(255) NOT NULL,
        latitude DOUBLE PRECISION NOT NULL,
        longitude DOUBLE PRECISION NOT NULL
    )
"#;

/// Create the schools table if it is missing. Safe to run on every start.
pub async fn run(pool: &PgPool) -> Result<(), StartupError> {
    tracing::info!("Ensuring 'schools' table...");

    sqlx::query(CREATE_SCHOOLS)
        .execute(pool)
        .await
        .map_err(StartupError::Migrate)?;

    tracing::info!("'schools' table ensured");
    Ok(())
}
