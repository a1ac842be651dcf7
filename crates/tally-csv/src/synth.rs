//! Reproducible synthetic source data.
//!
//! All randomness flows from one [`StdRng`] seeded by [`SynthConfig::seed`];
//! the same config always produces the same tables. The generated orders
//! deliberately contain blank shipping costs and exact duplicate lines so the
//! cleaning stages have something to do.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use rand::{
  Rng, SeedableRng,
  rngs::StdRng,
  seq::{IndexedRandom, index},
};
use tally_core::{
  RawTables,
  customer::{RawCustomer, Segment},
  order::{OrderStatus, RawOrder},
  product::{Category, RawProduct, round2},
};
use tracing::info;

use crate::{Error, Result};

#[derive(Debug, Clone)]
pub struct SynthConfig {
  pub seed:             u64,
  pub customers:        usize,
  pub products:         usize,
  /// Number of orders; each order has one to five lines.
  pub orders:           usize,
  /// Order lines whose shipping cost is blanked out.
  pub missing_shipping: usize,
  /// Order lines appended a second time.
  pub duplicate_lines:  usize,
}

impl Default for SynthConfig {
  fn default() -> Self {
    Self {
      seed:             42,
      customers:        500,
      products:         50,
      orders:           2000,
      missing_shipping: 20,
      duplicate_lines:  10,
    }
  }
}

const COUNTRIES: [(&str, f64); 5] = [
  ("USA", 0.4),
  ("Canada", 0.2),
  ("UK", 0.15),
  ("Germany", 0.15),
  ("France", 0.1),
];

const SEGMENTS: [(Segment, f64); 3] = [
  (Segment::Premium, 0.2),
  (Segment::Standard, 0.5),
  (Segment::Basic, 0.3),
];

const STATUSES: [(OrderStatus, f64); 4] = [
  (OrderStatus::Completed, 0.85),
  (OrderStatus::Pending, 0.05),
  (OrderStatus::Cancelled, 0.05),
  (OrderStatus::Returned, 0.05),
];

/// Generate customers, products and orders per `config`.
pub fn generate(config: &SynthConfig) -> Result<RawTables> {
  let mut rng = StdRng::seed_from_u64(config.seed);

  let customers = customers(&mut rng, config.customers)?;
  let products = products(&mut rng, config.products);
  let mut orders = orders(&mut rng, config, &products)?;

  for i in sample_indices(&mut rng, orders.len(), config.missing_shipping) {
    orders[i].shipping_cost = None;
  }
  let duplicates: Vec<RawOrder> =
    sample_indices(&mut rng, orders.len(), config.duplicate_lines)
      .into_iter()
      .map(|i| orders[i].clone())
      .collect();
  orders.extend(duplicates);

  info!(
    "generated {} customers, {} products, {} order lines (seed {})",
    customers.len(),
    products.len(),
    orders.len(),
    config.seed
  );
  Ok(RawTables { customers, products, orders })
}

fn start_date() -> NaiveDateTime {
  NaiveDate::from_ymd_opt(2024, 1, 1)
    .and_then(|d| d.and_hms_opt(0, 0, 0))
    .unwrap_or_default()
}

fn customers(rng: &mut StdRng, n: usize) -> Result<Vec<RawCustomer>> {
  (1..=n as i64)
    .map(|id| {
      Ok(RawCustomer {
        customer_id:       id,
        customer_name:     format!("Customer_{id}"),
        email:             format!("customer{id}@email.com"),
        registration_date: start_date() + TimeDelta::days(rng.random_range(0..=300)),
        country:           weighted(rng, &COUNTRIES)?.to_owned(),
        customer_segment:  weighted(rng, &SEGMENTS)?,
      })
    })
    .collect()
}

fn products(rng: &mut StdRng, n: usize) -> Vec<RawProduct> {
  (1..=n as i64)
    .map(|id| RawProduct {
      product_id:   id,
      product_name: format!("Product_{id}"),
      category:     Category::ALL[rng.random_range(0..Category::ALL.len())],
      base_price:   round2(rng.random_range(10.0..500.0)),
      cost:         round2(rng.random_range(5.0..250.0)),
    })
    .collect()
}

fn orders(
  rng: &mut StdRng,
  config: &SynthConfig,
  products: &[RawProduct],
) -> Result<Vec<RawOrder>> {
  // 2024-01-01 through 2024-10-31.
  const SPAN_DAYS: i64 = 304;

  let mut lines = Vec::with_capacity(config.orders * 3);
  if config.customers == 0 || products.is_empty() {
    return Ok(lines);
  }

  for order_id in 1..=config.orders as i64 {
    let customer_id = rng.random_range(1..=config.customers as i64);
    let order_date = start_date() + TimeDelta::days(rng.random_range(0..=SPAN_DAYS));
    let line_count = rng.random_range(1..=5);

    for line in 0..line_count {
      let product = &products[rng.random_range(0..products.len())];
      let quantity: i64 = rng.random_range(1..=3);
      let price = product.base_price * rng.random_range(0.9..1.1);
      let status = weighted(rng, &STATUSES)?;
      let shipping = if line == 0 { round2(rng.random_range(5.0..25.0)) } else { 0.0 };

      lines.push(RawOrder {
        order_id,
        customer_id,
        product_id: product.product_id,
        order_date,
        quantity,
        unit_price: round2(price),
        total_amount: round2(price * quantity as f64),
        status,
        shipping_cost: Some(shipping),
      });
    }
  }
  Ok(lines)
}

/// Pick from `choices` with probability proportional to each weight.
fn weighted<T: Copy>(rng: &mut StdRng, choices: &[(T, f64)]) -> Result<T> {
  choices
    .choose_weighted(rng, |(_, weight)| *weight)
    .map(|(choice, _)| *choice)
    .map_err(|e| Error::Sampling(e.to_string()))
}

/// `amount` distinct indices below `len`, fewer if `len` is smaller.
fn sample_indices(rng: &mut StdRng, len: usize, amount: usize) -> Vec<usize> {
  index::sample(rng, len, amount.min(len)).into_vec()
}

#[cfg(test)]
mod tests {
  use std::collections::HashSet;

  use super::*;

  fn small() -> SynthConfig {
    SynthConfig { customers: 40, products: 8, orders: 60, ..Default::default() }
  }

  #[test]
  fn same_seed_same_tables() {
    assert_eq!(generate(&small()).unwrap(), generate(&small()).unwrap());
  }

  #[test]
  fn different_seed_different_tables() {
    let other = SynthConfig { seed: 7, ..small() };
    assert_ne!(generate(&small()).unwrap(), generate(&other).unwrap());
  }

  #[test]
  fn injects_missing_shipping_and_duplicates() {
    let cfg = small();
    let tables = generate(&cfg).unwrap();

    let missing = tables.orders.iter().filter(|o| o.shipping_cost.is_none()).count();
    // Duplicates may copy a blanked line, so at least the configured count.
    assert!(missing >= cfg.missing_shipping);

    let distinct: HashSet<_> = tables.orders.iter().map(|o| o.row_key()).collect();
    assert!(distinct.len() <= tables.orders.len() - cfg.duplicate_lines);
  }

  #[test]
  fn references_stay_in_range() {
    let cfg = small();
    let tables = generate(&cfg).unwrap();
    assert_eq!(tables.customers.len(), cfg.customers);
    assert_eq!(tables.products.len(), cfg.products);
    for o in &tables.orders {
      assert!((1..=cfg.customers as i64).contains(&o.customer_id));
      assert!((1..=cfg.products as i64).contains(&o.product_id));
      assert!((1..=3).contains(&o.quantity));
    }
    for p in &tables.products {
      assert!(p.base_price >= 10.0 && p.base_price <= 500.0);
    }
  }

  #[test]
  fn weighted_pick_respects_zero_weights() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..100 {
      assert_eq!(weighted(&mut rng, &[("a", 0.0), ("b", 1.0), ("c", 0.0)]).unwrap(), "b");
    }
  }

  #[test]
  fn all_zero_weights_are_rejected() {
    let mut rng = StdRng::seed_from_u64(1);
    let err = weighted(&mut rng, &[("a", 0.0), ("b", 0.0)]).unwrap_err();
    assert!(matches!(err, Error::Sampling(_)));
  }

  #[test]
  fn sample_indices_are_distinct() {
    let mut rng = StdRng::seed_from_u64(3);
    let picked = sample_indices(&mut rng, 10, 25);
    let unique: HashSet<_> = picked.iter().collect();
    assert_eq!(picked.len(), 10);
    assert_eq!(unique.len(), 10);
  }
}
