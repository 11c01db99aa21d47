use std::{
  collections::{BTreeMap, BTreeSet},
  fs::File,
  io::Write,
};

use anyhow::{Context, Result};
use log::warn;

use crate::{
  batch::Outcome,
  config::Config,
  error::BenchError,
  stats::Summary,
  timing::VariantTimings,
};

/// Fixed report schema: the case identifier plus four statistics for each of
/// the three variants.
pub const COLUMNS: [&str; 13] = [
  "benchmark_name",
  "native_min",
  "native_max",
  "native_median",
  "native_stddev",
  "aot_min",
  "aot_max",
  "aot_median",
  "aot_stddev",
  "aot_pgo_min",
  "aot_pgo_max",
  "aot_pgo_median",
  "aot_pgo_stddev",
];

const PLACEHOLDER: &str = "NA";

/// One data row per declared case, sorted lexicographically by case name.
/// Failed and unreported cases both get the full placeholder row; a case
/// nobody reported on additionally gets a warning.
pub fn rows(suite: &[String], outcomes: &BTreeMap<String, Outcome>) -> Vec<Vec<String>> {
  let cases: BTreeSet<&String> = suite.iter().collect();

  cases
    .into_iter()
    .map(|case| {
      let row = match outcomes.get(case) {
        Some(Outcome::Measured(timings)) => measured_row(case, timings),
        Some(Outcome::Failed) => placeholder_row(case),
        None => {
          warn!("{case}: no outcome was recorded, writing a placeholder row");

          placeholder_row(case)
        }
      };

      checked_row(case, row)
    })
    .collect()
}

/// Shape guard for the report contract: a row with the wrong field count is
/// replaced by the placeholder row, with a warning.
fn checked_row(case: &str, row: Vec<String>) -> Vec<String> {
  if row.len() != COLUMNS.len() {
    let err = BenchError::MalformedResult {
      case: case.to_string(),
      fields: row.len(),
      expected: COLUMNS.len(),
    };
    warn!("{err}");

    return placeholder_row(case);
  }

  row
}

/// Writes the consolidated report, truncating any previous one. The header
/// is always written, even for an empty suite.
pub fn write(config: &Config, outcomes: &BTreeMap<String, Outcome>) -> Result<()> {
  let mut file = File::create(&config.report_file)
    .with_context(|| format!("create {:?}", config.report_file))?;

  writeln!(file, "{}", COLUMNS.join(",")).context("write header")?;

  for row in rows(&config.cases, outcomes) {
    writeln!(file, "{}", row.join(",")).context("write row")?;
  }

  Ok(())
}

fn measured_row(case: &str, timings: &VariantTimings) -> Vec<String> {
  let mut row = vec![case.to_string()];
  for summary in [&timings.native, &timings.aot, &timings.aot_pgo] {
    row.extend(summary_fields(summary));
  }

  row
}

fn summary_fields(summary: &Summary) -> Vec<String> {
  [summary.min, summary.max, summary.median, summary.stddev]
    .iter()
    .map(|value| format!("{value:.6}"))
    .collect()
}

fn placeholder_row(case: &str) -> Vec<String> {
  let mut row = vec![case.to_string()];
  row.extend(std::iter::repeat(PLACEHOLDER.to_string()).take(COLUMNS.len() - 1));

  row
}
