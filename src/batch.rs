use std::{
  collections::BTreeMap,
  panic::{self, AssertUnwindSafe},
};

use anyhow::{Context, Result};
use log::{info, warn};
use rayon::prelude::*;

use crate::{
  config::Config,
  error::BenchError,
  timing::{self, VariantTimings},
};

/// Outcome of one case's measurement. Either every variant summary is
/// present, or the whole case is a failure; there is no partial record.
pub enum Outcome {
  Measured(VariantTimings),
  Failed,
}

/// Measures every case on a bounded worker pool, recording exactly one
/// outcome per case. Panics and errors inside one worker are converted to
/// `Outcome::Failed` at the worker boundary and never abort the batch.
pub fn run_all(config: &Config) -> Result<BTreeMap<String, Outcome>> {
  run_all_with(config, timing::measure)
}

fn run_all_with<F>(config: &Config, measure: F) -> Result<BTreeMap<String, Outcome>>
where
  F: Fn(&Config, &str) -> Result<VariantTimings, BenchError> + Sync,
{
  let pool = rayon::ThreadPoolBuilder::new()
    .num_threads(config.max_jobs)
    .build()
    .context("build worker pool")?;

  info!("measuring {} cases on {} workers", config.cases.len(), config.max_jobs);

  let entries: Vec<(String, Outcome)> = pool.install(|| {
    config
      .cases
      .par_iter()
      .map(|case| {
        let result = panic::catch_unwind(AssertUnwindSafe(|| measure(config, case)));

        let outcome = match result {
          Ok(Ok(timings)) => {
            info!("{case}: measured");

            Outcome::Measured(timings)
          }
          Ok(Err(err)) => {
            warn!("{case}: {err}");

            Outcome::Failed
          }
          Err(payload) => {
            let detail = payload
              .downcast_ref::<&str>()
              .map(|s| s.to_string())
              .or_else(|| payload.downcast_ref::<String>().cloned())
              .unwrap_or_else(|| "unknown panic".to_string());
            let err = BenchError::WorkerCrash {
              case: case.clone(),
              detail,
            };
            warn!("{err}");

            Outcome::Failed
          }
        };

        (case.clone(), outcome)
      })
      .collect()
  });

  // write-once per case id; duplicate suite entries keep the first outcome
  let mut outcomes = BTreeMap::new();
  for (case, outcome) in entries {
    outcomes.entry(case).or_insert(outcome);
  }

  Ok(outcomes)
}
