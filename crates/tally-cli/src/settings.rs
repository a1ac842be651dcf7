//! Pipeline settings: an optional TOML file overlaid by `TALLY_*` variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

/// Where inputs are read from and outputs written to.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
  /// Directory holding `customers.csv`, `products.csv` and `orders.csv`.
  pub data_dir:     PathBuf,
  pub db_path:      PathBuf,
  /// Directory the report pages are written to.
  pub output_dir:   PathBuf,
  pub top_products: usize,
  /// Seed for `tally generate` when `--seed` is not given.
  pub seed:         u64,
}

impl Default for PipelineConfig {
  fn default() -> Self {
    Self {
      data_dir:     PathBuf::from("data"),
      db_path:      PathBuf::from("output/ecommerce.db"),
      output_dir:   PathBuf::from("output"),
      top_products: 10,
      seed:         42,
    }
  }
}

impl PipelineConfig {
  /// Read `path` if it exists, then apply `TALLY_`-prefixed environment
  /// variables on top. Missing keys fall back to the defaults.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("TALLY"))
      .build()
      .context("failed to read config file")?
      .try_deserialize()
      .context("failed to deserialise PipelineConfig")
  }
}
