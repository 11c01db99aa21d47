use std::{
  process::{Command, ExitStatus, Output, Stdio},
  time::Duration,
};

use wait_timeout::ChildExt as WaitExt;

use crate::error::BenchError;

/// Render a command line for error messages and logs.
pub fn display(command: &Command) -> String {
  std::iter::once(command.get_program())
    .chain(command.get_args())
    .map(|part| part.to_string_lossy().into_owned())
    .collect::<Vec<_>>()
    .join(" ")
}

#[extend::ext(name = ExitStatusExt)]
pub impl ExitStatus {
  fn check_success(&self, command: &Command, stderr: &[u8]) -> Result<(), BenchError> {
    if !self.success() {
      return Err(BenchError::CommandFailed {
        command: display(command),
        status: *self,
        stderr: String::from_utf8_lossy(stderr).into_owned(),
      });
    }

    Ok(())
  }
}

#[extend::ext(name = CommandExt)]
pub impl Command {
  /// Runs the command to completion, capturing stdout and stderr. A nonzero
  /// exit is an error carrying the captured stderr; a failed external command
  /// is never retried.
  fn run_checked(&mut self) -> Result<Output, BenchError> {
    let output = self.output().map_err(|source| BenchError::CommandUnavailable {
      command: display(self),
      source,
    })?;

    output.status.check_success(self, &output.stderr)?;

    Ok(output)
  }

  /// Runs the command with output discarded, killing it after `timeout`.
  /// Returns the raw exit status; callers decide whether nonzero is fatal.
  fn run_timeout(&mut self, timeout: Duration) -> Result<ExitStatus, BenchError> {
    let mut child = self
      .stdout(Stdio::null())
      .stderr(Stdio::null())
      .spawn()
      .map_err(|source| BenchError::CommandUnavailable {
        command: display(self),
        source,
      })?;

    let status = child.wait_timeout(timeout).map_err(|source| BenchError::CommandUnavailable {
      command: display(self),
      source,
    })?;

    match status {
      Some(status) => Ok(status),
      None => {
        child.kill().ok();
        child.wait().ok();

        Err(BenchError::CommandTimeout {
          command: display(self),
          timeout,
        })
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn run_checked_captures_stderr_on_failure() {
    let mut command = Command::new("sh");
    command.args(["-c", "echo oops >&2; exit 3"]);

    match command.run_checked() {
      Err(BenchError::CommandFailed { status, stderr, .. }) => {
        assert_eq!(status.code(), Some(3));
        assert_eq!(stderr.trim(), "oops");
      }
      other => panic!("expected CommandFailed, got {other:?}"),
    }
  }

  #[test]
  fn run_checked_missing_binary_is_unavailable() {
    let result = Command::new("wamr-pgo-bench-no-such-tool").run_checked();

    assert!(matches!(result, Err(BenchError::CommandUnavailable { .. })));
  }

  #[test]
  fn run_timeout_kills_hung_process() {
    let mut command = Command::new("sleep");
    command.arg("60");

    let result = command.run_timeout(Duration::from_millis(50));

    assert!(matches!(result, Err(BenchError::CommandTimeout { .. })));
  }

  #[test]
  fn run_timeout_reports_nonzero_status_to_caller() {
    let mut command = Command::new("sh");
    command.args(["-c", "exit 7"]);

    let status = command.run_timeout(Duration::from_secs(5)).unwrap();

    assert_eq!(status.code(), Some(7));
  }
}
