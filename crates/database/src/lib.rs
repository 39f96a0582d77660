//! # Billing Database Crate
//!
//! This crate is the only part of the system that talks to PostgreSQL or reads the
//! source files. It creates the schema, bulk-loads the delimited sources and runs
//! the two revenue aggregations.
//!
//! ## Public API
//!
//! - `Store`: connection settings; hands out one connection per unit of work.
//! - `DbRepository`: schema initialization, per-file batch loads and the revenue queries.
//! - `standard_loads` / `read_source`: the fixed load plan and the CSV reader behind it.
//! - `DbError` / `ErrorKind`: the errors returned from this crate and their categories.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod loader;
pub mod repository;
pub mod schema;

// Re-export the key components to create a clean, public-facing API.
pub use connection::Store;
pub use error::{DbError, ErrorKind};
pub use loader::{read_source, standard_loads, SourceLoad, SourceRow};
pub use repository::DbRepository;

// Callers that match on `DbError`'s driver errors need the same `sqlx`.
pub use sqlx;
