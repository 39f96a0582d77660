//! # Billing Analytics
//!
//! Turns the results of the two revenue aggregations into the text report the
//! binary prints. This is a pure logic crate: it has no knowledge of the store
//! or the source files.
//!
//! ## Public API
//!
//! - `RevenueReport`: the top product and the client ranking, rendered via `Display`.

// Declare the modules that constitute this crate.
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use report::{RevenueReport, SEPARATOR};
