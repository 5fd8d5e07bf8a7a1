//! Database layer - connection pool, schema bootstrap and repositories
//!
//! # Design Principles
//!
//! - One bounded pool per process, injected into the repository
//! - Each repository call is a single statement on one checked-out connection
//! - No transactions, no retries; errors go back to the caller

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::create_pool;
pub use repos::*;
