//! Delimited-file codec for the tally pipeline's three source tables.
//!
//! - [`Extractor`] reads `customers.csv`, `products.csv` and `orders.csv`
//!   from a directory into typed raw records.
//! - [`write_tables`] writes raw records back out in the same layout.
//! - [`synth`] produces a reproducible synthetic data set.

mod read;
mod timestamp;
mod write;

pub mod error;
pub mod synth;

pub use error::{Error, Result};
pub use read::{CUSTOMERS_FILE, Extractor, ORDERS_FILE, PRODUCTS_FILE};
pub use timestamp::parse_timestamp;
pub use write::write_tables;
