//! Error type for `tally-store-sqlite`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] rusqlite::Error),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  /// A read-only connection was requested for a store that was never written.
  #[error("no store at {}", .0.display())]
  StoreNotFound(PathBuf),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
