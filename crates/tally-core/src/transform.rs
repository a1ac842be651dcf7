//! The transform stage: clean each source table, then join them into the
//! sales fact table.
//!
//! Every stage is a pure function of its input and the processing time held
//! by the [`Transformer`]; running it twice over the same input produces the
//! same output.

use std::collections::{HashMap, HashSet};

use chrono::{NaiveDateTime, TimeDelta};
use tracing::info;

use crate::{
  customer::{Customer, RawCustomer, normalize_country},
  fact::{RevenueSummary, SalesFact},
  order::{Calendar, OrderLine, RawOrder},
  product::{Product, RawProduct},
  tables::{CleanTables, RawTables},
};

// ─── Stage reports ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CustomerStats {
  pub input:              usize,
  pub duplicates_removed: usize,
  pub output:             usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrderStats {
  pub input:              usize,
  pub duplicates_removed: usize,
  pub shipping_filled:    usize,
  /// Median used for imputation; `None` when no shipping cost was known.
  pub median_shipping:    Option<f64>,
  /// Rows dropped because `total_order_value` was not positive (or could not
  /// be computed).
  pub invalid_removed:    usize,
  pub output:             usize,
}

/// What the transform did, stage by stage.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TransformReport {
  pub customers: CustomerStats,
  pub products:  usize,
  pub orders:    OrderStats,
  pub fact_rows: usize,
  pub completed: RevenueSummary,
}

/// Output of [`Transformer::transform`].
#[derive(Debug, Clone, PartialEq)]
pub struct Transformed {
  pub tables: CleanTables,
  pub report: TransformReport,
}

// ─── Transformer ─────────────────────────────────────────────────────────────

/// Runs the cleaning stages relative to a fixed processing time.
#[derive(Debug, Clone, Copy)]
pub struct Transformer {
  processing_time: NaiveDateTime,
}

impl Transformer {
  pub fn new(processing_time: NaiveDateTime) -> Self { Self { processing_time } }

  /// A transformer anchored at the current local wall-clock time.
  pub fn now() -> Self { Self::new(chrono::Local::now().naive_local()) }

  pub fn processing_time(&self) -> NaiveDateTime { self.processing_time }

  /// Run all four stages in order.
  pub fn transform(&self, raw: RawTables) -> Transformed {
    info!("transforming {} customers, {} products, {} order lines",
      raw.customers.len(), raw.products.len(), raw.orders.len());

    let (customers, customer_stats) = self.clean_customers(raw.customers);
    let products = self.clean_products(raw.products);
    let (orders, order_stats) = self.clean_orders(raw.orders);
    let (fact_sales, completed) =
      self.build_fact_table(&orders, &products, &customers);

    let report = TransformReport {
      customers: customer_stats,
      products: products.len(),
      orders: order_stats,
      fact_rows: fact_sales.len(),
      completed,
    };

    Transformed {
      tables: CleanTables { customers, products, orders, fact_sales },
      report,
    }
  }

  // ── Customers ─────────────────────────────────────────────────────────────

  /// Drop repeated customer ids (first occurrence wins), normalize country
  /// names and derive days since registration.
  pub fn clean_customers(
    &self,
    raw: Vec<RawCustomer>,
  ) -> (Vec<Customer>, CustomerStats) {
    let input = raw.len();
    let mut seen = HashSet::with_capacity(input);

    let customers: Vec<Customer> = raw
      .into_iter()
      .filter(|c| seen.insert(c.customer_id))
      .map(|c| Customer {
        days_since_registration: self.days_since(c.registration_date),
        country: normalize_country(&c.country),
        customer_id: c.customer_id,
        customer_name: c.customer_name,
        email: c.email,
        registration_date: c.registration_date,
        customer_segment: c.customer_segment,
      })
      .collect();

    let stats = CustomerStats {
      input,
      duplicates_removed: input - customers.len(),
      output: customers.len(),
    };
    info!(
      "cleaned customers: removed {} duplicates -> {} records",
      stats.duplicates_removed, stats.output
    );
    (customers, stats)
  }

  /// Whole days from `since` to the processing time, rounded towards
  /// negative infinity.
  fn days_since(&self, since: NaiveDateTime) -> i64 {
    let delta = self.processing_time - since;
    let days = delta.num_days();
    if delta < TimeDelta::days(days) { days - 1 } else { days }
  }

  // ── Products ──────────────────────────────────────────────────────────────

  /// Derive margin and price tier. Product ids are trusted to be unique.
  pub fn clean_products(&self, raw: Vec<RawProduct>) -> Vec<Product> {
    let products: Vec<Product> = raw.into_iter().map(Product::from).collect();
    let undefined = products.iter().filter(|p| p.profit_margin.is_none()).count();
    info!("cleaned products: added profit metrics -> {} records", products.len());
    if undefined > 0 {
      info!("{undefined} products have an undefined profit margin");
    }
    products
  }

  // ── Orders ────────────────────────────────────────────────────────────────

  /// Drop exact duplicate rows, impute missing shipping costs with the
  /// median of the remaining known costs, derive calendar fields and drop
  /// rows whose total order value is not positive.
  pub fn clean_orders(&self, raw: Vec<RawOrder>) -> (Vec<OrderLine>, OrderStats) {
    let input = raw.len();

    let mut seen = HashSet::with_capacity(input);
    let unique: Vec<RawOrder> =
      raw.into_iter().filter(|o| seen.insert(o.row_key())).collect();
    let duplicates_removed = input - unique.len();

    let missing = unique.iter().filter(|o| o.shipping_cost.is_none()).count();
    let median_shipping =
      median(unique.iter().filter_map(|o| o.shipping_cost).collect());
    if missing > 0 {
      match median_shipping {
        Some(m) => info!("filling {missing} missing shipping costs with median {m:.2}"),
        None => info!("{missing} shipping costs missing and no median available"),
      }
    }
    let shipping_filled = if median_shipping.is_some() { missing } else { 0 };

    let after_dedupe = unique.len();
    let orders: Vec<OrderLine> = unique
      .into_iter()
      .filter_map(|o| {
        let shipping_cost = o.shipping_cost.or(median_shipping)?;
        let total_order_value = o.total_amount + shipping_cost;
        (total_order_value > 0.0).then(|| OrderLine {
          calendar: Calendar::of(o.order_date),
          order_id: o.order_id,
          customer_id: o.customer_id,
          product_id: o.product_id,
          order_date: o.order_date,
          quantity: o.quantity,
          unit_price: o.unit_price,
          total_amount: o.total_amount,
          shipping_cost,
          total_order_value,
          status: o.status,
        })
      })
      .collect();

    let stats = OrderStats {
      input,
      duplicates_removed,
      shipping_filled,
      median_shipping,
      invalid_removed: after_dedupe - orders.len(),
      output: orders.len(),
    };
    info!(
      "cleaned orders: removed {} duplicates and {} invalid rows -> {} records",
      stats.duplicates_removed, stats.invalid_removed, stats.output
    );
    (orders, stats)
  }

  // ── Fact table ────────────────────────────────────────────────────────────

  /// Left-join orders to products and customers and compute the money
  /// measures. One fact row per order line, in order-line order.
  pub fn build_fact_table(
    &self,
    orders: &[OrderLine],
    products: &[Product],
    customers: &[Customer],
  ) -> (Vec<SalesFact>, RevenueSummary) {
    let product_by_id = first_by_key(products, |p| p.product_id);
    let customer_by_id = first_by_key(customers, |c| c.customer_id);

    let facts: Vec<SalesFact> = orders
      .iter()
      .map(|o| {
        let product = product_by_id.get(&o.product_id).copied();
        let customer = customer_by_id.get(&o.customer_id).copied();
        sales_fact(o, product, customer)
      })
      .collect();

    let unmatched = facts
      .iter()
      .filter(|f| f.category.is_none() || f.customer_segment.is_none())
      .count();
    if unmatched > 0 {
      info!("{unmatched} sales records reference a missing product or customer");
    }

    let summary = RevenueSummary::of(&facts);
    info!("created {} sales records", facts.len());
    info!("completed revenue: {:.2}", summary.revenue);
    info!("completed profit: {:.2}", summary.gross_profit);
    (facts, summary)
  }
}

fn sales_fact(
  order: &OrderLine,
  product: Option<&Product>,
  customer: Option<&Customer>,
) -> SalesFact {
  let revenue = order.total_amount;
  let cost = product.map(|p| p.cost);
  let cost_of_goods = cost.map(|c| c * order.quantity as f64);

  SalesFact {
    order_id: order.order_id,
    customer_id: order.customer_id,
    product_id: order.product_id,
    order_date: order.order_date,
    calendar: order.calendar.clone(),
    quantity: order.quantity,
    unit_price: order.unit_price,
    total_amount: order.total_amount,
    shipping_cost: order.shipping_cost,
    total_order_value: order.total_order_value,
    status: order.status,
    category: product.map(|p| p.category),
    cost,
    profit_margin: product.and_then(|p| p.profit_margin),
    price_tier: product.and_then(|p| p.price_tier),
    customer_segment: customer.map(|c| c.customer_segment),
    country: customer.map(|c| c.country.clone()),
    revenue,
    cost_of_goods,
    gross_profit: cost_of_goods.map(|cogs| revenue - cogs),
  }
}

/// Index rows by key, keeping the first row seen for each key.
fn first_by_key<T>(rows: &[T], key: impl Fn(&T) -> i64) -> HashMap<i64, &T> {
  let mut map = HashMap::with_capacity(rows.len());
  for row in rows {
    map.entry(key(row)).or_insert(row);
  }
  map
}

/// Median of `values`; the mean of the two middle values for even counts.
pub fn median(mut values: Vec<f64>) -> Option<f64> {
  if values.is_empty() {
    return None;
  }
  values.sort_by(f64::total_cmp);
  let mid = values.len() / 2;
  if values.len() % 2 == 0 {
    Some((values[mid - 1] + values[mid]) / 2.0)
  } else {
    Some(values[mid])
  }
}
