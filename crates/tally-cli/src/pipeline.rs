//! Stage orchestration: extract → transform → load → report.

use std::path::PathBuf;

use anyhow::Context as _;
use tally_core::{
  Transformer,
  store::{LoadReport, SalesWarehouse},
  transform::TransformReport,
};
use tally_csv::{
  Extractor,
  synth::{self, SynthConfig},
};
use tally_report::Reporter;
use tally_store_sqlite::{SqliteAnalytics, SqliteStore};
use tracing::info;

use crate::settings::PipelineConfig;

/// Everything a full run produced.
#[derive(Debug)]
pub struct RunOutcome {
  pub transform: TransformReport,
  pub load:      LoadReport,
  pub pages:     Vec<PathBuf>,
}

/// Run all four stages against `cfg`. Any failure aborts the run.
pub fn run(cfg: &PipelineConfig, transformer: &Transformer) -> anyhow::Result<RunOutcome> {
  let raw = Extractor::new(&cfg.data_dir)
    .extract_all()
    .with_context(|| format!("failed to extract from {}", cfg.data_dir.display()))?;

  let transformed = transformer.transform(raw);
  let transform = transformed.report;

  let load = {
    let mut store = SqliteStore::open(&cfg.db_path)
      .with_context(|| format!("failed to open store at {}", cfg.db_path.display()))?;
    store
      .replace_schema(&transformed.tables)
      .context("failed to load warehouse")?
  };
  info!(
    "loaded {} customers, {} products, {} fact rows",
    load.customers, load.products, load.fact_sales
  );

  let pages = report(cfg)?;
  Ok(RunOutcome { transform, load, pages })
}

/// Render every report page from the store at `cfg.db_path`.
pub fn report(cfg: &PipelineConfig) -> anyhow::Result<Vec<PathBuf>> {
  Reporter::new(SqliteAnalytics::new(&cfg.db_path), &cfg.output_dir)
    .with_top_products(cfg.top_products)
    .run_all()
    .context("failed to render reports")
}

/// Write synthetic `customers.csv`, `products.csv` and `orders.csv` into
/// `cfg.data_dir`.
pub fn generate(cfg: &PipelineConfig, seed: u64) -> anyhow::Result<()> {
  let tables = synth::generate(&SynthConfig { seed, ..SynthConfig::default() })
    .context("failed to generate synthetic data")?;
  tally_csv::write_tables(&cfg.data_dir, &tables)
    .with_context(|| format!("failed to write inputs to {}", cfg.data_dir.display()))
}
