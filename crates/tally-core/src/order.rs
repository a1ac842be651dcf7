//! Order lines: raw extract rows and cleaned rows with calendar fields.

use chrono::{Datelike as _, NaiveDateTime, Weekday};
use serde::Serialize;

// ─── Status ──────────────────────────────────────────────────────────────────

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  strum::Display,
  strum::EnumString,
  strum::IntoStaticStr,
)]
pub enum OrderStatus {
  Completed,
  Pending,
  Cancelled,
  Returned,
}

impl OrderStatus {
  pub fn as_str(self) -> &'static str { self.into() }

  pub fn is_completed(self) -> bool { matches!(self, Self::Completed) }
}

// ─── Calendar ────────────────────────────────────────────────────────────────

/// Calendar breakdown of an order timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calendar {
  /// Year-month period, e.g. `2024-03`.
  pub month:       String,
  pub year:        i32,
  /// 1 through 4.
  pub quarter:     u32,
  /// English weekday name, e.g. `Monday`.
  pub day_of_week: String,
}

impl Calendar {
  pub fn of(ts: NaiveDateTime) -> Self {
    Self {
      month:       ts.format("%Y-%m").to_string(),
      year:        ts.year(),
      quarter:     (ts.month() - 1) / 3 + 1,
      day_of_week: weekday_name(ts.weekday()).to_owned(),
    }
  }
}

fn weekday_name(day: Weekday) -> &'static str {
  match day {
    Weekday::Mon => "Monday",
    Weekday::Tue => "Tuesday",
    Weekday::Wed => "Wednesday",
    Weekday::Thu => "Thursday",
    Weekday::Fri => "Friday",
    Weekday::Sat => "Saturday",
    Weekday::Sun => "Sunday",
  }
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// An order line exactly as read from the source file. Shipping cost may be
/// missing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawOrder {
  pub order_id:      i64,
  pub customer_id:   i64,
  pub product_id:    i64,
  #[serde(serialize_with = "crate::datetime::serialize")]
  pub order_date:    NaiveDateTime,
  pub quantity:      i64,
  pub unit_price:    f64,
  pub total_amount:  f64,
  pub status:        OrderStatus,
  pub shipping_cost: Option<f64>,
}

/// Hashable identity of a raw row: every column, floats compared by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RowKey {
  order_id:      i64,
  customer_id:   i64,
  product_id:    i64,
  order_date:    NaiveDateTime,
  quantity:      i64,
  unit_price:    u64,
  total_amount:  u64,
  status:        OrderStatus,
  shipping_cost: Option<u64>,
}

/// Bit pattern of a float with `-0.0` folded onto `0.0`, so that numerically
/// equal cells hash equally.
fn float_bits(value: f64) -> u64 {
  if value == 0.0 { 0.0f64.to_bits() } else { value.to_bits() }
}

impl RawOrder {
  pub fn row_key(&self) -> RowKey {
    RowKey {
      order_id:      self.order_id,
      customer_id:   self.customer_id,
      product_id:    self.product_id,
      order_date:    self.order_date,
      quantity:      self.quantity,
      unit_price:    float_bits(self.unit_price),
      total_amount:  float_bits(self.total_amount),
      status:        self.status,
      shipping_cost: self.shipping_cost.map(float_bits),
    }
  }
}

/// A cleaned order line: shipping cost imputed, calendar fields derived and
/// `total_order_value > 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
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
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;

  fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
      .unwrap()
      .and_hms_opt(0, 0, 0)
      .unwrap()
  }

  #[test]
  fn calendar_fields() {
    let cal = Calendar::of(at(2024, 3, 5));
    assert_eq!(cal.month, "2024-03");
    assert_eq!(cal.year, 2024);
    assert_eq!(cal.quarter, 1);
    assert_eq!(cal.day_of_week, "Tuesday");
  }

  #[test]
  fn quarter_boundaries() {
    assert_eq!(Calendar::of(at(2024, 4, 1)).quarter, 2);
    assert_eq!(Calendar::of(at(2024, 9, 30)).quarter, 3);
    assert_eq!(Calendar::of(at(2024, 12, 31)).quarter, 4);
  }

  #[test]
  fn negative_zero_shipping_matches_zero() {
    let a = RawOrder {
      order_id:      1,
      customer_id:   1,
      product_id:    1,
      order_date:    at(2024, 1, 1),
      quantity:      1,
      unit_price:    10.0,
      total_amount:  10.0,
      status:        OrderStatus::Completed,
      shipping_cost: Some(0.0),
    };
    let b = RawOrder { shipping_cost: Some(-0.0), ..a.clone() };
    assert_eq!(a.row_key(), b.row_key());

    let c = RawOrder { shipping_cost: None, ..a.clone() };
    assert_ne!(a.row_key(), c.row_key());
  }
}
