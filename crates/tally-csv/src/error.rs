//! Error types for the tally-csv codec.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("source file not found: {}", .0.display())]
  SourceNotFound(PathBuf),

  #[error("{table}: missing required column {column:?}")]
  SchemaMismatch { table: &'static str, column: String },

  #[error("{table} line {line}, column {column:?} (value {value:?}): {message}")]
  Parse {
    table:   &'static str,
    line:    u64,
    column:  &'static str,
    value:   String,
    message: String,
  },

  /// The synthetic generator was given unusable sampling weights.
  #[error("sampling error: {0}")]
  Sampling(String),

  #[error("csv error: {0}")]
  Csv(#[from] csv::Error),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
