//! Writes raw tables in the layout [`Extractor`](crate::Extractor) reads.

use std::path::Path;

use serde::Serialize;
use tally_core::RawTables;
use tracing::info;

use crate::{
  Result,
  read::{
    CUSTOMER_COLUMNS, CUSTOMERS_FILE, ORDER_COLUMNS, ORDERS_FILE,
    PRODUCT_COLUMNS, PRODUCTS_FILE,
  },
};

/// Write `customers.csv`, `products.csv` and `orders.csv` into `dir`,
/// creating it if needed. Missing shipping costs are written as empty cells.
pub fn write_tables(dir: &Path, tables: &RawTables) -> Result<()> {
  std::fs::create_dir_all(dir)?;

  write_table(&dir.join(CUSTOMERS_FILE), &CUSTOMER_COLUMNS, &tables.customers)?;
  write_table(&dir.join(PRODUCTS_FILE), &PRODUCT_COLUMNS, &tables.products)?;
  write_table(&dir.join(ORDERS_FILE), &ORDER_COLUMNS, &tables.orders)?;

  info!(
    "wrote {} customers, {} products, {} orders to {}",
    tables.customers.len(),
    tables.products.len(),
    tables.orders.len(),
    dir.display()
  );
  Ok(())
}

/// The header is written explicitly so an empty table still carries it.
fn write_table<T: Serialize>(path: &Path, columns: &[&str], rows: &[T]) -> Result<()> {
  let mut w = csv::WriterBuilder::new().has_headers(false).from_path(path)?;
  w.write_record(columns)?;
  for row in rows {
    w.serialize(row)?;
  }
  w.flush()?;
  Ok(())
}
