//! Timestamp text formats accepted in source files.

use chrono::{NaiveDate, NaiveDateTime};

const DATETIME_FORMATS: &[&str] = &[
  "%Y-%m-%d %H:%M:%S%.f",
  "%Y-%m-%dT%H:%M:%S%.f",
  "%Y-%m-%d %H:%M",
];

/// Parse a timestamp. Date-only values resolve to midnight.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
  let s = s.trim();
  DATETIME_FORMATS
    .iter()
    .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    .or_else(|| {
      NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn ymd_hms(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
      .unwrap()
      .and_hms_opt(h, mi, s)
      .unwrap()
  }

  #[test]
  fn accepts_common_layouts() {
    let expected = ymd_hms(2024, 3, 5, 14, 30, 0);
    assert_eq!(parse_timestamp("2024-03-05 14:30:00"), Some(expected));
    assert_eq!(parse_timestamp("2024-03-05T14:30:00"), Some(expected));
    assert_eq!(parse_timestamp("2024-03-05 14:30"), Some(expected));
    assert_eq!(parse_timestamp(" 2024-03-05 14:30:00.000 "), Some(expected));
  }

  #[test]
  fn date_only_is_midnight() {
    assert_eq!(parse_timestamp("2024-03-05"), Some(ymd_hms(2024, 3, 5, 0, 0, 0)));
  }

  #[test]
  fn garbage_is_rejected() {
    assert_eq!(parse_timestamp("yesterday"), None);
    assert_eq!(parse_timestamp("2024-13-01"), None);
    assert_eq!(parse_timestamp(""), None);
  }
}
