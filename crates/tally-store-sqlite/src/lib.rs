//! SQLite backend for the tally sales warehouse.
//!
//! [`SqliteStore`] owns the single read-write connection used to replace the
//! star schema. [`SqliteAnalytics`] answers report queries, opening a fresh
//! read-only connection for each one.

mod analytics;
mod encode;
mod queries;
mod schema;
mod store;

pub mod error;

pub use analytics::SqliteAnalytics;
pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
