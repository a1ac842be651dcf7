//! Result rows of the aggregate report queries.
//!
//! Every aggregate is restricted to completed order lines. Group keys are
//! optional because unmatched dimension references leave them null.

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyTrend {
  pub order_month:   String,
  pub total_revenue: f64,
  pub total_profit:  f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryPerformance {
  pub category:      Option<String>,
  pub total_revenue: f64,
  pub total_profit:  f64,
  pub order_count:   i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SegmentRevenue {
  pub customer_segment: Option<String>,
  pub total_revenue:    f64,
  pub customer_count:   i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductRevenue {
  pub product_id:    i64,
  pub product_name:  String,
  pub category:      String,
  pub total_revenue: f64,
  pub units_sold:    i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CountryRevenue {
  pub country:         Option<String>,
  pub total_revenue:   f64,
  pub order_count:     i64,
  pub avg_order_value: f64,
}

/// Headline numbers for the summary page. Sums and averages are `None` when
/// there are no completed lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryStats {
  pub total_customers:   i64,
  pub total_products:    i64,
  pub total_orders:      i64,
  pub total_revenue:     Option<f64>,
  pub total_profit:      Option<f64>,
  pub avg_order_value:   Option<f64>,
  pub avg_profit_margin: Option<f64>,
}
