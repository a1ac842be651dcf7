//! The canonical text form of timestamps in files and in the store.

use chrono::NaiveDateTime;
use serde::Serializer;

/// `YYYY-MM-DD HH:MM:SS`.
pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `serialize_with` adapter writing [`FORMAT`].
pub fn serialize<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
  serializer.collect_str(&ts.format(FORMAT))
}
