//! Rendering tests against a canned analytics backend.

use std::{cell::Cell, fs, io};

use tally_core::analytics::{
  CategoryPerformance, CountryRevenue, MonthlyTrend, ProductRevenue,
  SegmentRevenue, SummaryStats,
};

use super::*;

/// Fixed query results; counts how many queries were issued.
#[derive(Default)]
struct Canned {
  queries: Cell<usize>,
  fail:    bool,
}

impl Canned {
  fn hit(&self) -> io::Result<()> {
    self.queries.set(self.queries.get() + 1);
    if self.fail {
      Err(io::Error::other("store unavailable"))
    } else {
      Ok(())
    }
  }
}

impl SalesAnalytics for Canned {
  type Error = io::Error;

  fn monthly_trend(&self) -> io::Result<Vec<MonthlyTrend>> {
    self.hit()?;
    Ok(vec![
      MonthlyTrend { order_month: "2024-01".into(), total_revenue: 1200.0, total_profit: 300.0 },
      MonthlyTrend { order_month: "2024-02".into(), total_revenue: 900.0, total_profit: -50.0 },
    ])
  }

  fn category_performance(&self) -> io::Result<Vec<CategoryPerformance>> {
    self.hit()?;
    Ok(vec![
      CategoryPerformance {
        category:      Some("Home & Garden".into()),
        total_revenue: 1500.0,
        total_profit:  200.0,
        order_count:   12,
      },
      CategoryPerformance {
        category:      None,
        total_revenue: 25.0,
        total_profit:  0.0,
        order_count:   1,
      },
    ])
  }

  fn segment_revenue(&self) -> io::Result<Vec<SegmentRevenue>> {
    self.hit()?;
    Ok(vec![
      SegmentRevenue { customer_segment: Some("Premium".into()), total_revenue: 700.0, customer_count: 3 },
      SegmentRevenue { customer_segment: Some("Basic".into()), total_revenue: 300.0, customer_count: 1200 },
    ])
  }

  fn top_products(&self, limit: usize) -> io::Result<Vec<ProductRevenue>> {
    self.hit()?;
    let all = vec![
      ProductRevenue {
        product_id:    4,
        product_name:  "Product_4".into(),
        category:      "Books".into(),
        total_revenue: 800.0,
        units_sold:    9,
      },
      ProductRevenue {
        product_id:    2,
        product_name:  "Product_2".into(),
        category:      "Sports".into(),
        total_revenue: 100.0,
        units_sold:    2,
      },
    ];
    Ok(all.into_iter().take(limit).collect())
  }

  fn country_breakdown(&self) -> io::Result<Vec<CountryRevenue>> {
    self.hit()?;
    Ok(vec![CountryRevenue {
      country:         Some("United States".into()),
      total_revenue:   2100.0,
      order_count:     7,
      avg_order_value: 300.0,
    }])
  }

  fn summary_stats(&self) -> io::Result<SummaryStats> {
    self.hit()?;
    Ok(SummaryStats {
      total_customers:   1234,
      total_products:    50,
      total_orders:      7,
      total_revenue:     Some(2100.0),
      total_profit:      Some(250.0),
      avg_order_value:   Some(300.0),
      avg_profit_margin: Some(11.904),
    })
  }
}

#[test]
fn run_all_writes_six_pages() {
  let dir = tempfile::tempdir().unwrap();
  let out = dir.path().join("reports");
  let reporter = Reporter::new(Canned::default(), &out);

  let pages = reporter.run_all().unwrap();
  let names: Vec<_> = pages
    .iter()
    .map(|p| p.file_name().unwrap().to_str().unwrap().to_owned())
    .collect();
  assert_eq!(names, vec![
    MONTHLY_REVENUE,
    CATEGORY_PERFORMANCE,
    CUSTOMER_SEGMENTS,
    TOP_PRODUCTS,
    COUNTRY_ANALYSIS,
    SUMMARY_STATS,
  ]);
  for page in &pages {
    assert!(page.is_file());
  }
  assert_eq!(reporter.analytics.queries.get(), 6);
}

#[test]
fn summary_page_formats_numbers() {
  let dir = tempfile::tempdir().unwrap();
  let reporter = Reporter::new(Canned::default(), dir.path());
  let html = fs::read_to_string(reporter.summary_stats().unwrap()).unwrap();

  assert!(html.contains("1,234"));
  assert!(html.contains("$2,100.00"));
  assert!(html.contains("$250.00"));
  assert!(html.contains("11.9%"));
}

#[test]
fn null_groups_render_as_unknown_and_labels_are_escaped() {
  let dir = tempfile::tempdir().unwrap();
  let reporter = Reporter::new(Canned::default(), dir.path());
  let html = fs::read_to_string(reporter.category_performance().unwrap()).unwrap();

  assert!(html.contains("Home &amp; Garden"));
  assert!(html.contains(UNKNOWN));
}

#[test]
fn top_products_honours_limit() {
  let dir = tempfile::tempdir().unwrap();
  let reporter = Reporter::new(Canned::default(), dir.path()).with_top_products(1);
  let html = fs::read_to_string(reporter.top_products().unwrap()).unwrap();

  assert!(html.contains("Top 1 Products by Revenue"));
  assert!(html.contains("Product_4"));
  assert!(!html.contains("Product_2"));
}

#[test]
fn segment_page_lists_customer_counts() {
  let dir = tempfile::tempdir().unwrap();
  let reporter = Reporter::new(Canned::default(), dir.path());
  let html = fs::read_to_string(reporter.customer_segments().unwrap()).unwrap();
  assert!(html.contains("Premium (70.0%)"));
  assert!(html.contains("1,200"));
}

#[test]
fn query_failure_is_reported() {
  let dir = tempfile::tempdir().unwrap();
  let reporter = Reporter::new(Canned { fail: true, ..Default::default() }, dir.path());
  let err = reporter.run_all().unwrap_err();
  assert!(matches!(err, Error::Analytics(_)));
  assert!(err.to_string().contains("store unavailable"));
}

#[test]
fn pages_are_well_formed_markup() {
  use quick_xml::{Reader, events::Event};

  let dir = tempfile::tempdir().unwrap();
  let reporter = Reporter::new(Canned::default(), dir.path());
  for page in reporter.run_all().unwrap() {
    let html = fs::read_to_string(&page).unwrap();
    let mut reader = Reader::from_str(&html);
    let mut depth = 0i32;
    loop {
      match reader.read_event().unwrap() {
        Event::Start(_) => depth += 1,
        Event::End(_) => depth -= 1,
        Event::Eof => break,
        _ => {}
      }
    }
    assert_eq!(depth, 0, "unbalanced tags in {}", page.display());
  }
}
