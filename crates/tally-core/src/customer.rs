//! Customer records: the raw extract row and the cleaned dimension row.

use chrono::NaiveDateTime;
use serde::Serialize;

// ─── Segment ─────────────────────────────────────────────────────────────────

/// Marketing segment a customer belongs to.
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
pub enum Segment {
  Premium,
  Standard,
  Basic,
}

impl Segment {
  pub fn as_str(self) -> &'static str { self.into() }
}

// ─── Country ─────────────────────────────────────────────────────────────────

/// Short country spellings seen in source data and their canonical names.
const COUNTRY_SYNONYMS: &[(&str, &str)] =
  &[("USA", "United States"), ("UK", "United Kingdom")];

/// Map a country name to its canonical long form. Names without a synonym
/// pass through unchanged.
pub fn normalize_country(country: &str) -> String {
  COUNTRY_SYNONYMS
    .iter()
    .find(|(short, _)| *short == country)
    .map(|(_, long)| (*long).to_owned())
    .unwrap_or_else(|| country.to_owned())
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// A customer row exactly as read from the source file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawCustomer {
  pub customer_id:       i64,
  pub customer_name:     String,
  pub email:             String,
  #[serde(serialize_with = "crate::datetime::serialize")]
  pub registration_date: NaiveDateTime,
  pub country:           String,
  pub customer_segment:  Segment,
}

/// A cleaned customer, as persisted in `dim_customers`.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
  pub customer_id:             i64,
  pub customer_name:           String,
  pub email:                   String,
  pub registration_date:       NaiveDateTime,
  /// Canonical long-form name (see [`normalize_country`]).
  pub country:                 String,
  pub customer_segment:        Segment,
  /// Whole days between registration and processing time, floored. Negative
  /// when the registration lies in the future.
  pub days_since_registration: i64,
}
