//! Core types and the transform stage of the tally sales pipeline.
//!
//! This crate is free of file, CSV and database dependencies. The extractor,
//! loader and reporter crates all depend on it; it depends on none of them.

pub mod analytics;
pub mod customer;
pub mod datetime;
pub mod error;
pub mod fact;
pub mod order;
pub mod product;
pub mod store;
pub mod tables;
pub mod transform;

pub use error::{Error, Result};
pub use tables::{CleanTables, RawTables};
pub use transform::{Transformed, Transformer};
