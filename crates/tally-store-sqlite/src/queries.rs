//! Read queries shared by [`SqliteStore`](crate::SqliteStore) and
//! [`SqliteAnalytics`](crate::SqliteAnalytics).
//!
//! All aggregates are restricted to completed order lines. Group sums use
//! `TOTAL()` so a group whose profits are all NULL reports `0.0`; the
//! whole-table summaries use `SUM()` so an empty table reports NULL.

use rusqlite::{Connection, params};
use tally_core::{
  analytics::{
    CategoryPerformance, CountryRevenue, MonthlyTrend, ProductRevenue,
    SegmentRevenue, SummaryStats,
  },
  store::LoadSummary,
};

use crate::Result;

pub fn load_summary(conn: &Connection) -> Result<LoadSummary> {
  Ok(conn.query_row(
    "SELECT COUNT(*), SUM(revenue), SUM(gross_profit)
     FROM fact_sales
     WHERE status = 'Completed'",
    [],
    |row| {
      Ok(LoadSummary {
        completed_orders: row.get(0)?,
        total_revenue:    row.get(1)?,
        total_profit:     row.get(2)?,
      })
    },
  )?)
}

pub fn monthly_trend(conn: &Connection) -> Result<Vec<MonthlyTrend>> {
  let mut stmt = conn.prepare(
    "SELECT order_month, TOTAL(revenue), TOTAL(gross_profit)
     FROM fact_sales
     WHERE status = 'Completed'
     GROUP BY order_month
     ORDER BY order_month",
  )?;
  let rows = stmt
    .query_map([], |row| {
      Ok(MonthlyTrend {
        order_month:   row.get(0)?,
        total_revenue: row.get(1)?,
        total_profit:  row.get(2)?,
      })
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

pub fn category_performance(conn: &Connection) -> Result<Vec<CategoryPerformance>> {
  let mut stmt = conn.prepare(
    "SELECT category,
            TOTAL(revenue)      AS total_revenue,
            TOTAL(gross_profit) AS total_profit,
            COUNT(*)            AS order_count
     FROM fact_sales
     WHERE status = 'Completed'
     GROUP BY category
     ORDER BY total_revenue DESC",
  )?;
  let rows = stmt
    .query_map([], |row| {
      Ok(CategoryPerformance {
        category:      row.get(0)?,
        total_revenue: row.get(1)?,
        total_profit:  row.get(2)?,
        order_count:   row.get(3)?,
      })
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

pub fn segment_revenue(conn: &Connection) -> Result<Vec<SegmentRevenue>> {
  let mut stmt = conn.prepare(
    "SELECT customer_segment,
            TOTAL(revenue)              AS total_revenue,
            COUNT(DISTINCT customer_id) AS customer_count
     FROM fact_sales
     WHERE status = 'Completed'
     GROUP BY customer_segment
     ORDER BY total_revenue DESC",
  )?;
  let rows = stmt
    .query_map([], |row| {
      Ok(SegmentRevenue {
        customer_segment: row.get(0)?,
        total_revenue:    row.get(1)?,
        customer_count:   row.get(2)?,
      })
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

/// Only products present in `dim_products` can rank.
pub fn top_products(conn: &Connection, limit: usize) -> Result<Vec<ProductRevenue>> {
  let limit = i64::try_from(limit).unwrap_or(i64::MAX);
  let mut stmt = conn.prepare(
    "SELECT p.product_id, p.product_name, p.category,
            TOTAL(f.revenue) AS total_revenue,
            SUM(f.quantity)  AS units_sold
     FROM fact_sales f
     JOIN dim_products p ON f.product_id = p.product_id
     WHERE f.status = 'Completed'
     GROUP BY p.product_id
     ORDER BY total_revenue DESC, p.product_id
     LIMIT ?1",
  )?;
  let rows = stmt
    .query_map(params![limit], |row| {
      Ok(ProductRevenue {
        product_id:    row.get(0)?,
        product_name:  row.get(1)?,
        category:      row.get(2)?,
        total_revenue: row.get(3)?,
        units_sold:    row.get(4)?,
      })
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

pub fn country_breakdown(conn: &Connection) -> Result<Vec<CountryRevenue>> {
  let mut stmt = conn.prepare(
    "SELECT country,
            TOTAL(revenue) AS total_revenue,
            COUNT(*)       AS order_count,
            AVG(revenue)   AS avg_order_value
     FROM fact_sales
     WHERE status = 'Completed'
     GROUP BY country
     ORDER BY total_revenue DESC",
  )?;
  let rows = stmt
    .query_map([], |row| {
      Ok(CountryRevenue {
        country:         row.get(0)?,
        total_revenue:   row.get(1)?,
        order_count:     row.get(2)?,
        avg_order_value: row.get(3)?,
      })
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

pub fn summary_stats(conn: &Connection) -> Result<SummaryStats> {
  Ok(conn.query_row(
    "SELECT COUNT(DISTINCT customer_id),
            COUNT(DISTINCT product_id),
            COUNT(*),
            SUM(revenue),
            SUM(gross_profit),
            AVG(revenue),
            AVG(gross_profit) / AVG(revenue) * 100
     FROM fact_sales
     WHERE status = 'Completed'",
    [],
    |row| {
      Ok(SummaryStats {
        total_customers:   row.get(0)?,
        total_products:    row.get(1)?,
        total_orders:      row.get(2)?,
        total_revenue:     row.get(3)?,
        total_profit:      row.get(4)?,
        avg_order_value:   row.get(5)?,
        avg_profit_margin: row.get(6)?,
      })
    },
  )?)
}
