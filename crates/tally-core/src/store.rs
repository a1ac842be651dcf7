//! The sink traits the pipeline writes to and reports read from.
//!
//! Implemented by storage backends (e.g. `tally-store-sqlite`). The reporter
//! depends on [`SalesAnalytics`], not on a concrete database.

use crate::{
  analytics::{
    CategoryPerformance, CountryRevenue, MonthlyTrend, ProductRevenue,
    SegmentRevenue, SummaryStats,
  },
  tables::CleanTables,
};

// ─── Load results ────────────────────────────────────────────────────────────

/// Completed-order totals read back from freshly written data.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoadSummary {
  pub completed_orders: i64,
  pub total_revenue:    Option<f64>,
  pub total_profit:     Option<f64>,
}

/// Row counts written per table, plus the read-back summary.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoadReport {
  pub customers:  usize,
  pub products:   usize,
  pub fact_sales: usize,
  pub summary:    LoadSummary,
}

// ─── Traits ──────────────────────────────────────────────────────────────────

/// A relational store holding the star schema.
pub trait SalesWarehouse {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Drop and recreate the schema, then write every table. Either all of it
  /// lands or none of it does.
  fn replace_schema(&mut self, tables: &CleanTables) -> Result<LoadReport, Self::Error>;

  /// Completed-order count, revenue and profit over the stored fact table.
  fn load_summary(&self) -> Result<LoadSummary, Self::Error>;
}

/// Read-only aggregate queries over a populated warehouse.
pub trait SalesAnalytics {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Revenue and profit per `YYYY-MM`, ascending by month.
  fn monthly_trend(&self) -> Result<Vec<MonthlyTrend>, Self::Error>;

  /// Revenue, profit and line count per category, by revenue descending.
  fn category_performance(&self) -> Result<Vec<CategoryPerformance>, Self::Error>;

  fn segment_revenue(&self) -> Result<Vec<SegmentRevenue>, Self::Error>;

  /// The `limit` best-selling products by revenue.
  fn top_products(&self, limit: usize) -> Result<Vec<ProductRevenue>, Self::Error>;

  fn country_breakdown(&self) -> Result<Vec<CountryRevenue>, Self::Error>;

  fn summary_stats(&self) -> Result<SummaryStats, Self::Error>;
}
