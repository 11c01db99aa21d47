use std::{
  process::Command,
  time::{Duration, Instant},
};

use log::debug;

use crate::{
  config::Config,
  error::BenchError,
  ext::{self, CommandExt},
  pipeline::Artifacts,
  stats::Summary,
};

/// Timing summaries for the three variants of one case.
#[derive(Debug, Clone, Copy)]
pub struct VariantTimings {
  pub native: Summary,
  pub aot: Summary,
  pub aot_pgo: Summary,
}

/// Times all three variants of `case` in fixed order. Variants share the
/// working directory, so they run sequentially within one case; different
/// cases are independent and safe to measure concurrently.
pub fn measure(config: &Config, case: &str) -> Result<VariantTimings, BenchError> {
  let artifacts = Artifacts::new(config, case);

  let mut native = Command::new(artifacts.native());
  native.current_dir(&config.out_dir);

  let mut aot = Command::new(&config.runtime_cmd);
  aot.current_dir(&config.out_dir).arg(artifacts.aot());

  let mut aot_pgo = Command::new(&config.runtime_cmd);
  aot_pgo.current_dir(&config.out_dir).arg(artifacts.opt_aot());

  Ok(VariantTimings {
    native: Summary::of(&sample(config, case, "native", &mut native)?),
    aot: Summary::of(&sample(config, case, "aot", &mut aot)?),
    aot_pgo: Summary::of(&sample(config, case, "aot-pgo", &mut aot_pgo)?),
  })
}

/// Runs the warm-up iterations (durations discarded) followed by the
/// measured iterations, returning the measured wall-clock sample in seconds.
fn sample(config: &Config, case: &str, variant: &str, command: &mut Command) -> Result<Vec<f64>, BenchError> {
  for _ in 0..config.warmup_runs {
    timed_run(command, config.run_timeout)?;
  }

  let mut samples = Vec::with_capacity(config.timed_runs as usize);
  for run in 0..config.timed_runs {
    let elapsed = timed_run(command, config.run_timeout)?;
    debug!("{case}: {variant} run {run}: {elapsed:.6}s");
    samples.push(elapsed);
  }

  Ok(samples)
}

fn timed_run(command: &mut Command, timeout: Duration) -> Result<f64, BenchError> {
  let start = Instant::now();
  let status = command.run_timeout(timeout)?;
  let elapsed = start.elapsed().as_secs_f64();

  if !status.success() {
    return Err(BenchError::CommandFailed {
      command: ext::display(command),
      status,
      stderr: "(output discarded during timed runs)".to_string(),
    });
  }

  Ok(elapsed)
}
