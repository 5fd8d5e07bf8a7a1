//! Repository implementations for school records
//!
//! Handlers see storage only through [`SchoolStore`]:
//! - [`SchoolRepo`] runs against PostgreSQL
//! - [`MemorySchoolStore`] keeps rows in process, for tests and database-less runs

pub mod memory;
pub mod schools;

pub use memory::MemorySchoolStore;
pub use schools::{DbError, SchoolRepo, SchoolStore};
