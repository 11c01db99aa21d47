use std::{path::PathBuf, time::Duration};

/// The PolyBench cases benchmarked by this harness. Final report ordering is
/// lexicographic by case name, not the order given here.
pub const SUITE: &[&str] = &[
  "2mm",
  "3mm",
  "adi",
  "atax",
  "bicg",
  "cholesky",
  "correlation",
  "covariance",
  "deriche",
  "doitgen",
  "durbin",
  "fdtd-2d",
  "floyd-warshall",
  "gemm",
  "gemver",
  "gesummv",
  "gramschmidt",
  "heat-3d",
  "jacobi-1d",
  "jacobi-2d",
  "ludcmp",
  "lu",
  "mvt",
  "nussinov",
  "seidel-2d",
  "symm",
  "syr2k",
  "syrk",
  "trisolv",
  "trmm",
];

pub const DEFAULT_WARMUP_RUNS: u32 = 1;
pub const DEFAULT_TIMED_RUNS: u32 = 5;
pub const DEFAULT_MAX_JOBS: usize = 10;
pub const DEFAULT_RUN_TIMEOUT_SECS: u64 = 600;

/// Immutable harness configuration, built once at startup and passed
/// explicitly to every component.
pub struct Config {
  /// Directory holding `{case}.wasm` and `{case}_native` inputs; all derived
  /// artifacts and every benchmarked process run in this directory.
  pub out_dir: PathBuf,
  /// Consolidated CSV report, truncated and rewritten each run.
  pub report_file: PathBuf,
  /// AOT compiler (`wamrc`).
  pub compiler_cmd: PathBuf,
  /// Runtime used to execute `.aot` modules and emit raw profiles (`iwasm`).
  pub runtime_cmd: PathBuf,
  /// Profile merge tool (`llvm-profdata`).
  pub profdata_cmd: PathBuf,
  /// Pass `-sgx` to every compiler invocation; callers point `runtime_cmd`
  /// at the enclave build of the runtime themselves.
  pub sgx: bool,
  pub warmup_runs: u32,
  pub timed_runs: u32,
  pub max_jobs: usize,
  /// Upper bound on any single benchmarked process; a run that exceeds it is
  /// killed and fails its own workload only.
  pub run_timeout: Duration,
  pub cases: Vec<String>,
}

impl Config {
  /// Compiler arguments common to every compile step.
  pub fn compiler_base_args(&self) -> Vec<String> {
    if self.sgx {
      vec!["-sgx".to_string()]
    } else {
      Vec::new()
    }
  }
}
