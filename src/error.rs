use std::{path::PathBuf, time::Duration};

/// Failure modes of the benchmark harness. Single-workload failures are
/// logged and converted to report placeholders; they never abort the suite.
#[derive(thiserror::Error, Debug)]
pub enum BenchError {
  #[error("required artifact {path:?} does not exist")]
  PreconditionMissing { path: PathBuf },

  #[error("`{command}` failed with {status}\n{stderr}")]
  CommandFailed {
    command: String,
    status: std::process::ExitStatus,
    stderr: String,
  },

  #[error("`{command}` could not be run: {source}")]
  CommandUnavailable {
    command: String,
    #[source]
    source: std::io::Error,
  },

  #[error("`{command}` did not exit within {timeout:?}")]
  CommandTimeout { command: String, timeout: Duration },

  #[error("result row for {case:?} has {fields} fields, expected {expected}")]
  MalformedResult {
    case: String,
    fields: usize,
    expected: usize,
  },

  #[error("worker for {case:?} crashed: {detail}")]
  WorkerCrash { case: String, detail: String },
}
