//! schoolhub-server: HTTP service for school records
//!
//! Stores schools (name, address, coordinates) in PostgreSQL and lists
//! them ordered by distance from a caller-supplied point.

pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod models;
pub mod proximity;

use std::sync::Arc;

pub use config::{DbConfig, ServerConfig};
pub use db::repos::{DbError, MemorySchoolStore, SchoolRepo, SchoolStore};
pub use error::{Result, StartupError};
pub use http::{build_router, AppState};

/// Connect, verify the connection and make sure the schools table exists.
pub async fn init_storage(config: &DbConfig) -> Result<SchoolRepo> {
    let pool = db::create_pool(config).await?;
    db::migrations::run(&pool).await?;
    Ok(SchoolRepo::new(pool))
}

/// Start the HTTP server against PostgreSQL
pub async fn serve(db_config: DbConfig, config: ServerConfig) -> Result<()> {
    let repo = init_storage(&db_config).await?;
    http::run_server(AppState::new(Arc::new(repo)), config).await
}

/// Start the HTTP server with rows kept in process memory
pub async fn serve_in_memory(config: ServerConfig) -> Result<()> {
    tracing::warn!("Using in-memory storage; records are lost on exit");
    http::run_server(AppState::new(Arc::new(MemorySchoolStore::new())), config).await
}
