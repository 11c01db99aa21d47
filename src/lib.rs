pub mod batch;
pub mod config;
pub mod error;
pub mod ext;
pub mod pipeline;
pub mod report;
pub mod stats;
pub mod timing;

#[doc(hidden)]
pub mod testutil;

use anyhow::{Context, Result};
use log::info;

use crate::config::Config;

/// Runs the whole benchmark: sequential artifact pipeline, parallel timing,
/// then the consolidated report. Single-case failures are logged and end up
/// as placeholder rows; the report is always written.
pub fn run(config: &Config) -> Result<()> {
  std::fs::create_dir_all(&config.out_dir)
    .with_context(|| format!("create {:?}", config.out_dir))?;

  info!("preparing artifacts for {} cases", config.cases.len());
  for case in &config.cases {
    // build tools contend on shared state, so this phase stays sequential
    pipeline::prepare(config, case);
  }

  let outcomes = batch::run_all(config).context("run all")?;

  report::write(config, &outcomes).context("write report")?;
  info!("report written to {:?}", config.report_file);

  Ok(())
}
