//! [`SqliteStore`], the SQLite implementation of [`SalesWarehouse`].

use std::path::Path;

use rusqlite::{Connection, Transaction, params};
use tally_core::{
  CleanTables,
  analytics::{
    CategoryPerformance, CountryRevenue, MonthlyTrend, ProductRevenue,
    SegmentRevenue, SummaryStats,
  },
  customer::Customer,
  fact::SalesFact,
  product::Product,
  store::{LoadReport, LoadSummary, SalesAnalytics, SalesWarehouse},
};
use tracing::info;

use crate::{
  Error, Result,
  encode::{encode_dt, encode_opt},
  queries,
  schema::{CREATE_INDEXES, CREATE_SCHEMA, DROP_SCHEMA},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// The sales warehouse backed by a single SQLite file.
pub struct SqliteStore {
  conn: Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path`, creating parent directories.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
      && !parent.as_os_str().is_empty()
    {
      std::fs::create_dir_all(parent)?;
    }
    let conn = Connection::open(path)?;
    Ok(Self { conn })
  }

  /// Open an in-memory store, for tests.
  pub fn open_in_memory() -> Result<Self> {
    Ok(Self { conn: Connection::open_in_memory()? })
  }

  #[cfg(test)]
  pub(crate) fn connection(&self) -> &Connection { &self.conn }
}

// ─── Row writers ─────────────────────────────────────────────────────────────

fn insert_customers(tx: &Transaction<'_>, customers: &[Customer]) -> Result<usize> {
  let mut stmt = tx.prepare(
    "INSERT INTO dim_customers (
       customer_id, customer_name, email, registration_date,
       country, customer_segment, days_since_registration
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
  )?;
  for c in customers {
    stmt.execute(params![
      c.customer_id,
      c.customer_name,
      c.email,
      encode_dt(c.registration_date),
      c.country,
      c.customer_segment.as_str(),
      c.days_since_registration,
    ])?;
  }
  Ok(customers.len())
}

fn insert_products(tx: &Transaction<'_>, products: &[Product]) -> Result<usize> {
  let mut stmt = tx.prepare(
    "INSERT INTO dim_products (
       product_id, product_name, category, base_price,
       cost, profit_margin, price_tier
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
  )?;
  for p in products {
    stmt.execute(params![
      p.product_id,
      p.product_name,
      p.category.as_str(),
      p.base_price,
      p.cost,
      p.profit_margin,
      encode_opt(p.price_tier),
    ])?;
  }
  Ok(products.len())
}

fn insert_facts(tx: &Transaction<'_>, facts: &[SalesFact]) -> Result<usize> {
  let mut stmt = tx.prepare(
    "INSERT INTO fact_sales (
       order_id, customer_id, product_id, order_date,
       order_month, order_year, order_quarter, day_of_week,
       quantity, unit_price, total_amount, shipping_cost,
       total_order_value, status, category, customer_segment,
       country, price_tier, revenue, cost_of_goods, gross_profit
     ) VALUES (
       ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11,
       ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21
     )",
  )?;
  for f in facts {
    stmt.execute(params![
      f.order_id,
      f.customer_id,
      f.product_id,
      encode_dt(f.order_date),
      f.calendar.month,
      f.calendar.year,
      f.calendar.quarter,
      f.calendar.day_of_week,
      f.quantity,
      f.unit_price,
      f.total_amount,
      f.shipping_cost,
      f.total_order_value,
      f.status.as_str(),
      encode_opt(f.category),
      encode_opt(f.customer_segment),
      f.country,
      encode_opt(f.price_tier),
      f.revenue,
      f.cost_of_goods,
      f.gross_profit,
    ])?;
  }
  Ok(facts.len())
}

// ─── SalesWarehouse impl ─────────────────────────────────────────────────────

impl SalesWarehouse for SqliteStore {
  type Error = Error;

  fn replace_schema(&mut self, tables: &CleanTables) -> Result<LoadReport> {
    // Dropping the transaction without commit rolls everything back, so a
    // failure part-way leaves the previous contents in place.
    let tx = self.conn.transaction()?;
    tx.execute_batch(DROP_SCHEMA)?;
    tx.execute_batch(CREATE_SCHEMA)?;

    let customers = insert_customers(&tx, &tables.customers)?;
    info!("loaded {customers} records into dim_customers");
    let products = insert_products(&tx, &tables.products)?;
    info!("loaded {products} records into dim_products");
    let fact_sales = insert_facts(&tx, &tables.fact_sales)?;
    info!("loaded {fact_sales} records into fact_sales");

    tx.execute_batch(CREATE_INDEXES)?;
    tx.commit()?;

    let summary = self.load_summary()?;
    Ok(LoadReport { customers, products, fact_sales, summary })
  }

  fn load_summary(&self) -> Result<LoadSummary> { queries::load_summary(&self.conn) }
}

// ─── SalesAnalytics impl ─────────────────────────────────────────────────────

/// Report queries over the store's own connection.
impl SalesAnalytics for SqliteStore {
  type Error = Error;

  fn monthly_trend(&self) -> Result<Vec<MonthlyTrend>> { queries::monthly_trend(&self.conn) }

  fn category_performance(&self) -> Result<Vec<CategoryPerformance>> {
    queries::category_performance(&self.conn)
  }

  fn segment_revenue(&self) -> Result<Vec<SegmentRevenue>> {
    queries::segment_revenue(&self.conn)
  }

  fn top_products(&self, limit: usize) -> Result<Vec<ProductRevenue>> {
    queries::top_products(&self.conn, limit)
  }

  fn country_breakdown(&self) -> Result<Vec<CountryRevenue>> {
    queries::country_breakdown(&self.conn)
  }

  fn summary_stats(&self) -> Result<SummaryStats> { queries::summary_stats(&self.conn) }
}
