//! [`Extractor`] reads the three source tables into typed raw records.

use std::{
  fs::File,
  io,
  path::{Path, PathBuf},
  str::FromStr,
};

use chrono::NaiveDateTime;
use csv::StringRecord;
use tally_core::{
  RawTables,
  customer::RawCustomer,
  error::parse_variant,
  order::RawOrder,
  product::RawProduct,
};
use tracing::info;

use crate::{Error, Result, timestamp::parse_timestamp};

pub const CUSTOMERS_FILE: &str = "customers.csv";
pub const PRODUCTS_FILE: &str = "products.csv";
pub const ORDERS_FILE: &str = "orders.csv";

pub(crate) const CUSTOMER_COLUMNS: [&str; 6] = [
  "customer_id",
  "customer_name",
  "email",
  "registration_date",
  "country",
  "customer_segment",
];

pub(crate) const PRODUCT_COLUMNS: [&str; 5] =
  ["product_id", "product_name", "category", "base_price", "cost"];

pub(crate) const ORDER_COLUMNS: [&str; 9] = [
  "order_id",
  "customer_id",
  "product_id",
  "order_date",
  "quantity",
  "unit_price",
  "total_amount",
  "status",
  "shipping_cost",
];

// ─── Extractor ───────────────────────────────────────────────────────────────

/// Reads source tables from a directory of comma-delimited files.
#[derive(Debug, Clone)]
pub struct Extractor {
  data_dir: PathBuf,
}

impl Extractor {
  pub fn new(data_dir: impl Into<PathBuf>) -> Self {
    Self { data_dir: data_dir.into() }
  }

  pub fn data_dir(&self) -> &Path { &self.data_dir }

  pub fn extract_customers(&self) -> Result<Vec<RawCustomer>> {
    let path = self.data_dir.join(CUSTOMERS_FILE);
    let rows = read_table(&path, "customers", &CUSTOMER_COLUMNS, |r| {
      Ok(RawCustomer {
        customer_id:       r.parse(0)?,
        customer_name:     r.text(1),
        email:             r.text(2),
        registration_date: r.timestamp(3)?,
        country:           r.text(4),
        customer_segment:  r.variant(5, "customer segment")?,
      })
    })?;
    info!("extracted {} customers", rows.len());
    Ok(rows)
  }

  pub fn extract_products(&self) -> Result<Vec<RawProduct>> {
    let path = self.data_dir.join(PRODUCTS_FILE);
    let rows = read_table(&path, "products", &PRODUCT_COLUMNS, |r| {
      Ok(RawProduct {
        product_id:   r.parse(0)?,
        product_name: r.text(1),
        category:     r.variant(2, "category")?,
        base_price:   r.parse(3)?,
        cost:         r.parse(4)?,
      })
    })?;
    info!("extracted {} products", rows.len());
    Ok(rows)
  }

  pub fn extract_orders(&self) -> Result<Vec<RawOrder>> {
    let path = self.data_dir.join(ORDERS_FILE);
    let rows = read_table(&path, "orders", &ORDER_COLUMNS, |r| {
      Ok(RawOrder {
        order_id:      r.parse(0)?,
        customer_id:   r.parse(1)?,
        product_id:    r.parse(2)?,
        order_date:    r.timestamp(3)?,
        quantity:      r.parse(4)?,
        unit_price:    r.parse(5)?,
        total_amount:  r.parse(6)?,
        status:        r.variant(7, "order status")?,
        shipping_cost: r.optional_float(8)?,
      })
    })?;
    info!("extracted {} orders", rows.len());
    Ok(rows)
  }

  /// Read all three tables. Fails on the first missing or malformed file.
  pub fn extract_all(&self) -> Result<RawTables> {
    Ok(RawTables {
      customers: self.extract_customers()?,
      products:  self.extract_products()?,
      orders:    self.extract_orders()?,
    })
  }
}

// ─── Table reader ────────────────────────────────────────────────────────────

/// Open `path`, check that every name in `columns` is present in the header
/// and map each data record through `build`.
fn read_table<T>(
  path: &Path,
  table: &'static str,
  columns: &'static [&'static str],
  mut build: impl FnMut(&Row<'_>) -> Result<T>,
) -> Result<Vec<T>> {
  let file = File::open(path).map_err(|e| match e.kind() {
    io::ErrorKind::NotFound => Error::SourceNotFound(path.to_path_buf()),
    _ => Error::Io(e),
  })?;

  let mut reader = csv::ReaderBuilder::new()
    .trim(csv::Trim::All)
    .from_reader(file);

  let headers = reader.headers()?.clone();
  let positions = columns
    .iter()
    .map(|name| {
      headers
        .iter()
        .position(|h| h == *name)
        .ok_or_else(|| Error::SchemaMismatch { table, column: (*name).to_owned() })
    })
    .collect::<Result<Vec<_>>>()?;

  let mut rows = Vec::new();
  for record in reader.records() {
    let record = record?;
    let row = Row { table, columns, positions: &positions, record: &record };
    rows.push(build(&row)?);
  }
  Ok(rows)
}

/// One data record, addressed by position in the table's required-column
/// list rather than by position in the file.
struct Row<'a> {
  table:     &'static str,
  columns:   &'static [&'static str],
  positions: &'a [usize],
  record:    &'a StringRecord,
}

impl Row<'_> {
  fn raw(&self, i: usize) -> &str { self.record.get(self.positions[i]).unwrap_or("") }

  fn line(&self) -> u64 { self.record.position().map_or(0, |p| p.line()) }

  fn error(&self, i: usize, message: impl Into<String>) -> Error {
    Error::Parse {
      table:   self.table,
      line:    self.line(),
      column:  self.columns[i],
      value:   self.raw(i).to_owned(),
      message: message.into(),
    }
  }

  fn text(&self, i: usize) -> String { self.raw(i).to_owned() }

  fn parse<T>(&self, i: usize) -> Result<T>
  where
    T: FromStr,
  {
    self.raw(i).parse().map_err(|_| {
      self.error(i, format!("expected {}", short_type_name::<T>()))
    })
  }

  /// One of the fixed enumerations, by its canonical spelling.
  fn variant<T: FromStr>(&self, i: usize, kind: &'static str) -> Result<T> {
    parse_variant(kind, self.raw(i)).map_err(|e| self.error(i, e.to_string()))
  }

  /// Empty cells and `NaN` read as missing.
  fn optional_float(&self, i: usize) -> Result<Option<f64>> {
    let s = self.raw(i);
    if s.is_empty() {
      return Ok(None);
    }
    let value: f64 = self.parse(i)?;
    Ok((!value.is_nan()).then_some(value))
  }

  fn timestamp(&self, i: usize) -> Result<NaiveDateTime> {
    parse_timestamp(self.raw(i)).ok_or_else(|| self.error(i, "unparseable timestamp"))
  }
}

fn short_type_name<T>() -> &'static str {
  let full = std::any::type_name::<T>();
  full.rsplit("::").next().unwrap_or(full)
}
