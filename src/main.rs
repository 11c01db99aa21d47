use std::{path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use wamr_pgo_bench::config::{self, Config};

#[derive(Parser)]
struct Args {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  Bench {
    /// Directory holding the prebuilt `{case}.wasm` and `{case}_native`
    /// inputs; derived artifacts are written here too.
    #[arg(long, default_value = "./out")]
    out_dir: PathBuf,
    /// Where to write the consolidated CSV report.
    #[arg(long, default_value = "./report.csv")]
    report: PathBuf,
    /// AOT compiler.
    #[arg(long, default_value = "wamrc")]
    wamrc: PathBuf,
    /// Runtime used to execute AOT modules and collect profiles.
    #[arg(long, default_value = "iwasm")]
    iwasm: PathBuf,
    /// Profile merge tool.
    #[arg(long, default_value = "llvm-profdata")]
    llvm_profdata: PathBuf,
    /// Benchmark the SGX build of the toolchain; point --iwasm at the
    /// enclave runtime when using this.
    #[arg(long)]
    sgx: bool,
    /// Warm-up runs per variant, discarded from statistics.
    #[arg(long, default_value_t = config::DEFAULT_WARMUP_RUNS)]
    warmup: u32,
    /// Measured runs per variant.
    #[arg(long, default_value_t = config::DEFAULT_TIMED_RUNS)]
    runs: u32,
    /// Concurrent cases during the timing phase.
    #[arg(long, default_value_t = config::DEFAULT_MAX_JOBS)]
    jobs: usize,
    /// Kill any single benchmarked process after this many seconds.
    #[arg(long, default_value_t = config::DEFAULT_RUN_TIMEOUT_SECS)]
    run_timeout_secs: u64,
  },
}

fn main() -> Result<()> {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

  match Args::parse().command {
    Command::Bench {
      out_dir,
      report,
      wamrc,
      iwasm,
      llvm_profdata,
      sgx,
      warmup,
      runs,
      jobs,
      run_timeout_secs,
    } => {
      if !out_dir.exists() {
        anyhow::bail!("{out_dir:?} does not exist; run the suite build first");
      }

      let config = Config {
        out_dir,
        report_file: report,
        compiler_cmd: wamrc,
        runtime_cmd: iwasm,
        profdata_cmd: llvm_profdata,
        sgx,
        warmup_runs: warmup,
        timed_runs: runs,
        max_jobs: jobs,
        run_timeout: Duration::from_secs(run_timeout_secs),
        cases: config::SUITE.iter().map(ToString::to_string).collect(),
      };

      wamr_pgo_bench::run(&config).context("bench")?;
    }
  }

  Ok(())
}
