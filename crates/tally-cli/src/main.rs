//! `tally`: e-commerce sales ETL.
//!
//! Reads three CSV extracts, cleans them into a star schema in SQLite and
//! renders a set of HTML report pages.
//!
//! # Usage
//!
//! ```
//! tally                       # same as `tally run`
//! tally generate --seed 7     # write synthetic inputs into data_dir
//! tally report                # re-render pages from an existing store
//! tally --config tally.toml run
//! ```

mod pipeline;
mod settings;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use settings::PipelineConfig;
use tally_core::Transformer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "E-commerce sales ETL pipeline")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "tally.toml", global = true)]
  config: PathBuf,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
  /// Extract, transform, load and report (the default).
  Run,
  /// Write synthetic customers/products/orders CSVs into the data directory.
  Generate {
    /// RNG seed; defaults to `seed` from the config.
    #[arg(long)]
    seed: Option<u64>,
  },
  /// Re-render the report pages from the existing store.
  Report,
}

const RULE: &str = "==================================================";

fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let cfg = PipelineConfig::load(&cli.config)?;

  match cli.command.unwrap_or(Command::Run) {
    Command::Run => run(&cfg),
    Command::Generate { seed } => {
      let seed = seed.unwrap_or(cfg.seed);
      pipeline::generate(&cfg, seed)?;
      println!("Synthetic data (seed {seed}) written to {}", cfg.data_dir.display());
      Ok(())
    }
    Command::Report => {
      let pages = pipeline::report(&cfg)?;
      println!("{} report pages written to {}", pages.len(), cfg.output_dir.display());
      Ok(())
    }
  }
}

fn run(cfg: &PipelineConfig) -> anyhow::Result<()> {
  println!("{RULE}");
  println!("E-COMMERCE ANALYTICS ETL PIPELINE");
  println!("{RULE}");

  let outcome = pipeline::run(cfg, &Transformer::now())?;

  let t = &outcome.transform;
  println!("\nTransform");
  println!(
    "  customers: {} in, {} duplicates removed, {} out",
    t.customers.input, t.customers.duplicates_removed, t.customers.output
  );
  println!("  products:  {}", t.products);
  println!(
    "  orders:    {} in, {} duplicates removed, {} shipping costs filled, {} invalid removed, {} out",
    t.orders.input,
    t.orders.duplicates_removed,
    t.orders.shipping_filled,
    t.orders.invalid_removed,
    t.orders.output
  );
  if let Some(median) = t.orders.median_shipping {
    println!("  median shipping cost: {median:.2}");
  }
  println!("  fact rows: {}", t.fact_rows);

  let summary = &outcome.load.summary;
  println!("\nLoad ({})", cfg.db_path.display());
  println!("  completed orders: {}", summary.completed_orders);
  println!("  total revenue:    {}", amount(summary.total_revenue));
  println!("  total profit:     {}", amount(summary.total_profit));

  println!("\nReports ({})", cfg.output_dir.display());
  for page in &outcome.pages {
    println!("  {}", page.display());
  }

  println!("\n{RULE}");
  println!("Pipeline completed successfully!");
  println!("{RULE}");
  Ok(())
}

fn amount(value: Option<f64>) -> String {
  value.map_or_else(|| "n/a".to_owned(), tally_report::format::money)
}
