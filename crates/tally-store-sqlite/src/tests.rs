//! Integration tests for `SqliteStore` and `SqliteAnalytics`.

use chrono::{NaiveDate, NaiveDateTime};
use tally_core::{
  CleanTables, RawTables, Transformer,
  customer::{RawCustomer, Segment},
  order::{OrderStatus, RawOrder},
  product::{Category, RawProduct},
  store::{SalesAnalytics, SalesWarehouse},
};

use crate::{Error, SqliteAnalytics, SqliteStore};

fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
  NaiveDate::from_ymd_opt(y, m, d)
    .unwrap()
    .and_hms_opt(0, 0, 0)
    .unwrap()
}

fn store() -> SqliteStore { SqliteStore::open_in_memory().expect("in-memory store") }

fn line(
  order_id: i64,
  customer_id: i64,
  product_id: i64,
  date: NaiveDateTime,
  total: f64,
  status: OrderStatus,
) -> RawOrder {
  RawOrder {
    order_id,
    customer_id,
    product_id,
    order_date: date,
    quantity: 2,
    unit_price: total / 2.0,
    total_amount: total,
    status,
    shipping_cost: Some(5.0),
  }
}

fn raw() -> RawTables {
  let customer = |id: i64, country: &str, segment: Segment| RawCustomer {
    customer_id:       id,
    customer_name:     format!("Customer_{id}"),
    email:             format!("customer{id}@email.com"),
    registration_date: at(2024, 1, 10),
    country:           country.to_owned(),
    customer_segment:  segment,
  };
  let product = |id: i64, category: Category, base_price: f64, cost: f64| RawProduct {
    product_id: id,
    product_name: format!("Product_{id}"),
    category,
    base_price,
    cost,
  };

  RawTables {
    customers: vec![
      customer(1, "USA", Segment::Premium),
      customer(2, "Germany", Segment::Basic),
    ],
    products:  vec![
      product(1, Category::Books, 40.0, 10.0),
      product(2, Category::Electronics, 300.0, 200.0),
      product(3, Category::Sports, 0.0, 1.0),
    ],
    orders:    vec![
      line(1, 1, 1, at(2024, 1, 15), 80.0, OrderStatus::Completed),
      line(1, 1, 2, at(2024, 1, 15), 600.0, OrderStatus::Completed),
      line(2, 2, 2, at(2024, 2, 3), 300.0, OrderStatus::Completed),
      line(3, 2, 1, at(2024, 2, 20), 40.0, OrderStatus::Returned),
      line(4, 1, 77, at(2024, 3, 1), 25.0, OrderStatus::Completed),
      line(5, 9, 3, at(2024, 3, 2), 10.0, OrderStatus::Pending),
    ],
  }
}

fn clean() -> CleanTables { Transformer::new(at(2024, 12, 1)).transform(raw()).tables }

fn count(s: &SqliteStore, table: &str) -> i64 {
  s.connection()
    .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))
    .unwrap()
}

// ─── Loading ─────────────────────────────────────────────────────────────────

#[test]
fn replace_schema_writes_every_table() {
  let mut s = store();
  let tables = clean();
  let report = s.replace_schema(&tables).unwrap();

  assert_eq!(report.customers, 2);
  assert_eq!(report.products, 3);
  assert_eq!(report.fact_sales, tables.orders.len());
  assert_eq!(count(&s, "dim_customers"), 2);
  assert_eq!(count(&s, "dim_products"), 3);
  assert_eq!(count(&s, "fact_sales"), 6);
}

#[test]
fn load_summary_matches_completed_source_lines() {
  let mut s = store();
  let report = s.replace_schema(&clean()).unwrap();

  let expected: f64 = raw()
    .orders
    .iter()
    .filter(|o| o.status == OrderStatus::Completed)
    .map(|o| o.total_amount)
    .sum();

  assert_eq!(report.summary.completed_orders, 4);
  assert_eq!(report.summary.total_revenue, Some(expected));
  // 80-20 + 600-400 + 300-400; the unknown product contributes no profit.
  assert_eq!(report.summary.total_profit, Some(60.0 + 200.0 - 100.0));
}

#[test]
fn indexes_are_created() {
  let mut s = store();
  s.replace_schema(&clean()).unwrap();

  let mut stmt = s
    .connection()
    .prepare("SELECT name FROM sqlite_master WHERE type = 'index' AND tbl_name = 'fact_sales' ORDER BY name")
    .unwrap();
  let names: Vec<String> = stmt
    .query_map([], |r| r.get(0))
    .unwrap()
    .collect::<rusqlite::Result<_>>()
    .unwrap();
  assert_eq!(names, vec!["idx_sales_customer", "idx_sales_date", "idx_sales_product"]);
}

#[test]
fn unknown_references_are_stored_as_null() {
  let mut s = store();
  s.replace_schema(&clean()).unwrap();

  let (category, tier, cogs, profit): (Option<String>, Option<String>, Option<f64>, Option<f64>) = s
    .connection()
    .query_row(
      "SELECT category, price_tier, cost_of_goods, gross_profit FROM fact_sales WHERE product_id = 77",
      [],
      |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
    )
    .unwrap();
  assert_eq!((category, tier, cogs, profit), (None, None, None, None));

  let (segment, country): (Option<String>, Option<String>) = s
    .connection()
    .query_row(
      "SELECT customer_segment, country FROM fact_sales WHERE customer_id = 9",
      [],
      |r| Ok((r.get(0)?, r.get(1)?)),
    )
    .unwrap();
  assert_eq!((segment, country), (None, None));
}

#[test]
fn zero_price_product_has_null_margin() {
  let mut s = store();
  s.replace_schema(&clean()).unwrap();
  let margin: Option<f64> = s
    .connection()
    .query_row("SELECT profit_margin FROM dim_products WHERE product_id = 3", [], |r| r.get(0))
    .unwrap();
  assert_eq!(margin, None);
}

#[test]
fn stored_values_use_display_names() {
  let mut s = store();
  s.replace_schema(&clean()).unwrap();
  let (date, month, day, country): (String, String, String, String) = s
    .connection()
    .query_row(
      "SELECT order_date, order_month, day_of_week, country FROM fact_sales WHERE order_id = 2",
      [],
      |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
    )
    .unwrap();
  assert_eq!(date, "2024-02-03 00:00:00");
  assert_eq!(month, "2024-02");
  assert_eq!(day, "Saturday");
  assert_eq!(country, "Germany");

  let registered: String = s
    .connection()
    .query_row("SELECT registration_date FROM dim_customers WHERE customer_id = 1", [], |r| r.get(0))
    .unwrap();
  assert_eq!(registered, "2024-01-10 00:00:00");
}

#[test]
fn replacing_overwrites_previous_run() {
  let mut s = store();
  s.replace_schema(&clean()).unwrap();

  let mut smaller = clean();
  smaller.fact_sales.truncate(1);
  smaller.customers.truncate(1);
  s.replace_schema(&smaller).unwrap();

  assert_eq!(count(&s, "fact_sales"), 1);
  assert_eq!(count(&s, "dim_customers"), 1);
}

#[test]
fn failed_replace_keeps_previous_contents() {
  let mut s = store();
  s.replace_schema(&clean()).unwrap();

  // Two products with one id violate the primary key mid-load.
  let mut broken = clean();
  let dup = broken.products[0].clone();
  broken.products.push(dup);
  broken.fact_sales.clear();

  let err = s.replace_schema(&broken).unwrap_err();
  assert!(matches!(err, Error::Database(_)));
  assert_eq!(count(&s, "fact_sales"), 6);
  assert_eq!(count(&s, "dim_products"), 3);
}

// ─── Analytics ───────────────────────────────────────────────────────────────

#[test]
fn monthly_trend_is_ordered_and_completed_only() {
  let mut s = store();
  s.replace_schema(&clean()).unwrap();
  let months = s.monthly_trend().unwrap();

  let labels: Vec<_> = months.iter().map(|m| m.order_month.as_str()).collect();
  assert_eq!(labels, vec!["2024-01", "2024-02", "2024-03"]);
  assert_eq!(months[0].total_revenue, 680.0);
  assert_eq!(months[1].total_revenue, 300.0);
  assert_eq!(months[1].total_profit, -100.0);
  // Only the unknown-product line completed in March.
  assert_eq!(months[2].total_profit, 0.0);
}

#[test]
fn category_performance_groups_unknown_as_null() {
  let mut s = store();
  s.replace_schema(&clean()).unwrap();
  let cats = s.category_performance().unwrap();

  assert_eq!(cats[0].category.as_deref(), Some("Electronics"));
  assert_eq!(cats[0].total_revenue, 900.0);
  assert_eq!(cats[0].order_count, 2);
  assert!(cats.iter().any(|c| c.category.is_none() && c.total_revenue == 25.0));
}

#[test]
fn top_products_excludes_unknown_and_respects_limit() {
  let mut s = store();
  s.replace_schema(&clean()).unwrap();

  let top = s.top_products(10).unwrap();
  let ids: Vec<_> = top.iter().map(|p| p.product_id).collect();
  assert_eq!(ids, vec![2, 1]);
  assert_eq!(top[0].units_sold, 4);
  assert_eq!(top[0].category, "Electronics");

  assert_eq!(s.top_products(1).unwrap().len(), 1);
}

#[test]
fn segment_and_country_breakdowns() {
  let mut s = store();
  s.replace_schema(&clean()).unwrap();

  let segments = s.segment_revenue().unwrap();
  let premium = segments
    .iter()
    .find(|r| r.customer_segment.as_deref() == Some("Premium"))
    .unwrap();
  assert_eq!(premium.total_revenue, 705.0);
  assert_eq!(premium.customer_count, 1);

  let countries = s.country_breakdown().unwrap();
  assert_eq!(countries[0].country.as_deref(), Some("United States"));
  assert_eq!(countries[0].order_count, 3);
  assert_eq!(countries[0].avg_order_value, 235.0);
}

#[test]
fn summary_stats_over_completed_lines() {
  let mut s = store();
  s.replace_schema(&clean()).unwrap();
  let stats = s.summary_stats().unwrap();

  assert_eq!(stats.total_customers, 2);
  assert_eq!(stats.total_products, 3);
  assert_eq!(stats.total_orders, 4);
  assert_eq!(stats.total_revenue, Some(1005.0));
  assert_eq!(stats.avg_order_value, Some(1005.0 / 4.0));
  assert!(stats.avg_profit_margin.is_some());
}

#[test]
fn summary_stats_on_empty_store() {
  let mut s = store();
  s.replace_schema(&CleanTables::default()).unwrap();
  let stats = s.summary_stats().unwrap();
  assert_eq!(stats.total_orders, 0);
  assert_eq!(stats.total_revenue, None);
  assert_eq!(stats.avg_profit_margin, None);
}

#[test]
fn read_only_analytics_matches_store() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("nested").join("sales.db");

  let mut s = SqliteStore::open(&path).unwrap();
  s.replace_schema(&clean()).unwrap();
  let expected = s.monthly_trend().unwrap();
  drop(s);

  let analytics = SqliteAnalytics::new(&path);
  assert_eq!(analytics.monthly_trend().unwrap(), expected);
  assert_eq!(analytics.top_products(10).unwrap().len(), 2);
  // Re-running is side-effect free.
  assert_eq!(analytics.monthly_trend().unwrap(), expected);
}

#[test]
fn read_only_analytics_requires_existing_store() {
  let dir = tempfile::tempdir().unwrap();
  let analytics = SqliteAnalytics::new(dir.path().join("missing.db"));
  assert!(matches!(analytics.summary_stats(), Err(Error::StoreNotFound(_))));
  assert!(!dir.path().join("missing.db").exists());
}
