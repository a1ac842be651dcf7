//! The denormalized sales fact, one row per cleaned order line.

use chrono::NaiveDateTime;

use crate::{
  customer::Segment,
  order::{Calendar, OrderStatus},
  product::{Category, PriceTier},
};

/// An order line enriched with its product and customer attributes.
///
/// Enrichment fields are `None` when the referenced product or customer does
/// not exist; the row itself is never dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesFact {
  pub order_id:          i64,
  pub customer_id:       i64,
  pub product_id:        i64,
  pub order_date:        NaiveDateTime,
  pub calendar:          Calendar,
  pub quantity:          i64,
  pub unit_price:        f64,
  pub total_amount:      f64,
  pub shipping_cost:     f64,
  pub total_order_value: f64,
  pub status:            OrderStatus,

  // product side
  pub category:          Option<Category>,
  pub cost:              Option<f64>,
  pub profit_margin:     Option<f64>,
  pub price_tier:        Option<PriceTier>,

  // customer side
  pub customer_segment:  Option<Segment>,
  pub country:           Option<String>,

  // measures
  pub revenue:           f64,
  /// `cost * quantity`; unknown when the product is unknown.
  pub cost_of_goods:     Option<f64>,
  pub gross_profit:      Option<f64>,
}

/// Totals over completed order lines, for operator visibility.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RevenueSummary {
  pub completed_lines: usize,
  pub revenue:         f64,
  /// Sum of the known gross profits; lines without a cost are skipped.
  pub gross_profit:    f64,
}

impl RevenueSummary {
  pub fn of(facts: &[SalesFact]) -> Self {
    facts
      .iter()
      .filter(|f| f.status.is_completed())
      .fold(Self::default(), |acc, f| Self {
        completed_lines: acc.completed_lines + 1,
        revenue:         acc.revenue + f.revenue,
        gross_profit:    acc.gross_profit + f.gross_profit.unwrap_or(0.0),
      })
  }
}
