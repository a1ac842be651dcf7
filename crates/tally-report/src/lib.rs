//! Report pages rendered from the sales warehouse.
//!
//! [`Reporter`] runs each aggregate query through a [`SalesAnalytics`]
//! backend and writes one standalone HTML page per view into an output
//! directory. It never writes to the warehouse, so it can be re-run at will.

pub mod chart;
pub mod format;
pub mod markup;
pub mod page;

use std::path::{Path, PathBuf};

use tally_core::{analytics::SummaryStats, store::SalesAnalytics};
use thiserror::Error;
use tracing::info;

use chart::Series;
use page::Page;

// ─── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum Error {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("markup error: {0}")]
  Markup(#[from] quick_xml::Error),

  #[error("analytics query failed: {0}")]
  Analytics(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

fn analytics_err<E>(e: E) -> Error
where
  E: std::error::Error + Send + Sync + 'static,
{
  Error::Analytics(Box::new(e))
}

// ─── Page names ──────────────────────────────────────────────────────────────

pub const MONTHLY_REVENUE: &str = "monthly_revenue.html";
pub const CATEGORY_PERFORMANCE: &str = "category_performance.html";
pub const CUSTOMER_SEGMENTS: &str = "customer_segments.html";
pub const TOP_PRODUCTS: &str = "top_products.html";
pub const COUNTRY_ANALYSIS: &str = "country_analysis.html";
pub const SUMMARY_STATS: &str = "summary_stats.html";

/// Label shown for a group whose key is NULL (unmatched product/customer).
const UNKNOWN: &str = "Unknown";

fn label(key: Option<String>) -> String { key.unwrap_or_else(|| UNKNOWN.to_owned()) }

// ─── Reporter ────────────────────────────────────────────────────────────────

pub struct Reporter<A> {
  analytics:    A,
  output_dir:   PathBuf,
  top_products: usize,
}

impl<A: SalesAnalytics> Reporter<A> {
  pub fn new(analytics: A, output_dir: impl Into<PathBuf>) -> Self {
    Self { analytics, output_dir: output_dir.into(), top_products: 10 }
  }

  /// How many products the top-products page ranks (default 10).
  pub fn with_top_products(mut self, n: usize) -> Self {
    self.top_products = n;
    self
  }

  pub fn output_dir(&self) -> &Path { &self.output_dir }

  /// Render every page; returns the written paths in render order.
  pub fn run_all(&self) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(&self.output_dir)?;
    let pages = vec![
      self.monthly_revenue()?,
      self.category_performance()?,
      self.customer_segments()?,
      self.top_products()?,
      self.country_analysis()?,
      self.summary_stats()?,
    ];
    info!("all reports saved to {}", self.output_dir.display());
    Ok(pages)
  }

  fn write(&self, name: &str, page: Page) -> Result<PathBuf> {
    let path = self.output_dir.join(name);
    std::fs::write(&path, page.finish()?)?;
    info!("created {name}");
    Ok(path)
  }

  /// Revenue and profit per month, as a two-line trend.
  pub fn monthly_revenue(&self) -> Result<PathBuf> {
    let rows = self.analytics.monthly_trend().map_err(analytics_err)?;
    let months: Vec<String> = rows.iter().map(|r| r.order_month.clone()).collect();
    let revenue: Vec<f64> = rows.iter().map(|r| r.total_revenue).collect();
    let profit: Vec<f64> = rows.iter().map(|r| r.total_profit).collect();

    let mut page = Page::new("Monthly Revenue & Profit Trend")?;
    chart::line_chart(
      page.body(),
      &months,
      &[
        Series { name: "Revenue", color: "#636efa", values: &revenue },
        Series { name: "Profit", color: "#ef553b", values: &profit },
      ],
      "Amount ($)",
    )?;
    self.write(MONTHLY_REVENUE, page)
  }

  /// Revenue and profit per category, side by side.
  pub fn category_performance(&self) -> Result<PathBuf> {
    let rows = self.analytics.category_performance().map_err(analytics_err)?;
    let names: Vec<String> = rows.iter().map(|r| label(r.category.clone())).collect();
    let revenue: Vec<f64> = rows.iter().map(|r| r.total_revenue).collect();
    let profit: Vec<f64> = rows.iter().map(|r| r.total_profit).collect();

    let mut page = Page::new("Category Performance Analysis")?;
    page.heading("Revenue by Category")?;
    chart::bar_chart(page.body(), &names, &revenue, "#add8e6", "Revenue ($)")?;
    page.heading("Profit by Category")?;
    chart::bar_chart(page.body(), &names, &profit, "#90ee90", "Profit ($)")?;
    self.write(CATEGORY_PERFORMANCE, page)
  }

  pub fn customer_segments(&self) -> Result<PathBuf> {
    let rows = self.analytics.segment_revenue().map_err(analytics_err)?;
    let names: Vec<String> = rows.iter().map(|r| label(r.customer_segment.clone())).collect();
    let revenue: Vec<f64> = rows.iter().map(|r| r.total_revenue).collect();

    let counts: Vec<(String, String)> = rows
      .iter()
      .zip(&names)
      .map(|(r, name)| (name.clone(), format::count(r.customer_count)))
      .collect();
    let mut page = Page::new("Revenue by Customer Segment")?;
    chart::donut_chart(page.body(), &names, &revenue)?;
    page.table(("Segment", "Customers"), &counts)?;
    self.write(CUSTOMER_SEGMENTS, page)
  }

  pub fn top_products(&self) -> Result<PathBuf> {
    let rows = self.analytics.top_products(self.top_products).map_err(analytics_err)?;
    let names: Vec<String> = rows.iter().map(|r| r.product_name.clone()).collect();
    let revenue: Vec<f64> = rows.iter().map(|r| r.total_revenue).collect();

    let mut page = Page::new(&format!("Top {} Products by Revenue", self.top_products))?;
    chart::horizontal_bar_chart(page.body(), &names, &revenue, "#ff7f50", "Revenue ($)")?;
    self.write(TOP_PRODUCTS, page)
  }

  pub fn country_analysis(&self) -> Result<PathBuf> {
    let rows = self.analytics.country_breakdown().map_err(analytics_err)?;
    let names: Vec<String> = rows.iter().map(|r| label(r.country.clone())).collect();
    let revenue: Vec<f64> = rows.iter().map(|r| r.total_revenue).collect();

    let averages: Vec<(String, String)> = rows
      .iter()
      .zip(&names)
      .map(|(r, name)| {
        let detail = format!(
          "{} orders, avg {}",
          format::count(r.order_count),
          format::money(r.avg_order_value)
        );
        (name.clone(), detail)
      })
      .collect();
    let mut page = Page::new("Revenue by Country")?;
    chart::bar_chart(page.body(), &names, &revenue, "#636efa", "Total Revenue ($)")?;
    page.table(("Country", "Orders"), &averages)?;
    self.write(COUNTRY_ANALYSIS, page)
  }

  /// Headline numbers as a two-column table.
  pub fn summary_stats(&self) -> Result<PathBuf> {
    let stats = self.analytics.summary_stats().map_err(analytics_err)?;
    let mut page = Page::new("E-Commerce Analytics Summary")?;
    page.table(("Metric", "Value"), &summary_rows(&stats))?;
    self.write(SUMMARY_STATS, page)
  }
}

fn summary_rows(stats: &SummaryStats) -> Vec<(String, String)> {
  vec![
    ("Total Customers".to_owned(), format::count(stats.total_customers)),
    ("Total Products".to_owned(), format::count(stats.total_products)),
    ("Total Orders".to_owned(), format::count(stats.total_orders)),
    ("Total Revenue".to_owned(), format::money_or_na(stats.total_revenue)),
    ("Total Profit".to_owned(), format::money_or_na(stats.total_profit)),
    ("Avg Order Value".to_owned(), format::money_or_na(stats.avg_order_value)),
    ("Avg Profit Margin".to_owned(), format::percent(stats.avg_profit_margin)),
  ]
}

#[cfg(test)]
mod tests;
