//! Encoding helpers between domain types and SQLite column values.
//!
//! Timestamps are stored as `YYYY-MM-DD HH:MM:SS` text. Enumerations are
//! stored by their display names (`Home & Garden`, `Mid-Range`, ...).

use chrono::NaiveDateTime;
use tally_core::datetime;

pub fn encode_dt(dt: NaiveDateTime) -> String { dt.format(datetime::FORMAT).to_string() }

/// Display name of an optional enumeration, `NULL` when absent.
pub fn encode_opt<T: Into<&'static str>>(value: Option<T>) -> Option<&'static str> {
  value.map(Into::into)
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;
  use tally_core::product::PriceTier;

  use super::*;

  #[test]
  fn datetime_text() {
    let dt = NaiveDate::from_ymd_opt(2024, 2, 29)
      .unwrap()
      .and_hms_opt(7, 8, 9)
      .unwrap();
    assert_eq!(encode_dt(dt), "2024-02-29 07:08:09");
  }

  #[test]
  fn optional_variants() {
    assert_eq!(encode_opt(Some(PriceTier::MidRange)), Some("Mid-Range"));
    assert_eq!(encode_opt::<PriceTier>(None), None);
  }
}
