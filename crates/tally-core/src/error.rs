//! Error types for `tally-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown {kind}: {value:?}")]
  UnknownVariant { kind: &'static str, value: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Parse one of the fixed enumerations (segment, category, status, tier)
/// from its canonical spelling.
pub fn parse_variant<T>(kind: &'static str, value: &str) -> Result<T>
where
  T: std::str::FromStr,
{
  value.trim().parse().map_err(|_| Error::UnknownVariant {
    kind,
    value: value.to_owned(),
  })
}
