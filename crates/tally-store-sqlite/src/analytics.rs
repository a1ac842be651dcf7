//! [`SqliteAnalytics`]: report queries over read-only connections.

use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags};
use tally_core::{
  analytics::{
    CategoryPerformance, CountryRevenue, MonthlyTrend, ProductRevenue,
    SegmentRevenue, SummaryStats,
  },
  store::SalesAnalytics,
};

use crate::{Error, Result, queries};

/// Answers each report query on a fresh read-only connection to the store
/// file, so it never holds the database open between queries and cannot
/// modify it.
#[derive(Debug, Clone)]
pub struct SqliteAnalytics {
  path: PathBuf,
}

impl SqliteAnalytics {
  pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

  pub fn path(&self) -> &Path { &self.path }

  fn connect(&self) -> Result<Connection> {
    if !self.path.is_file() {
      return Err(Error::StoreNotFound(self.path.clone()));
    }
    let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    Ok(Connection::open_with_flags(&self.path, flags)?)
  }
}

impl SalesAnalytics for SqliteAnalytics {
  type Error = Error;

  fn monthly_trend(&self) -> Result<Vec<MonthlyTrend>> {
    queries::monthly_trend(&self.connect()?)
  }

  fn category_performance(&self) -> Result<Vec<CategoryPerformance>> {
    queries::category_performance(&self.connect()?)
  }

  fn segment_revenue(&self) -> Result<Vec<SegmentRevenue>> {
    queries::segment_revenue(&self.connect()?)
  }

  fn top_products(&self, limit: usize) -> Result<Vec<ProductRevenue>> {
    queries::top_products(&self.connect()?, limit)
  }

  fn country_breakdown(&self) -> Result<Vec<CountryRevenue>> {
    queries::country_breakdown(&self.connect()?)
  }

  fn summary_stats(&self) -> Result<SummaryStats> {
    queries::summary_stats(&self.connect()?)
  }
}
