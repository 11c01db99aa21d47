//! Stub toolchain helpers for tests. The external compiler, runtime and
//! profile-merge tools are replaced by shell scripts that log their
//! arguments and touch the expected output artifact.

use std::{
  fs,
  os::unix::fs::PermissionsExt,
  path::{Path, PathBuf},
  time::Duration,
};

use crate::config::Config;

pub const COMPILER_STUB: &str = r#"echo "$@" >> compile.log
while [ "$1" != "-o" ]; do shift; done
: > "$2""#;

pub const RUNTIME_STUB: &str = r#"echo "$@" >> runtime.log
for arg in "$@"; do
  case "$arg" in
    --gen-prof-file=*) : > "${arg#--gen-prof-file=}" ;;
  esac
done"#;

pub const PROFDATA_STUB: &str = r#"echo "$@" >> profdata.log
for arg in "$@"; do
  case "$arg" in
    -output=*) : > "${arg#-output=}" ;;
  esac
done"#;

pub fn stub_tool(dir: &Path, name: &str, script: &str) -> PathBuf {
  let path = dir.join(name);
  fs::write(&path, format!("#!/bin/sh\n{script}\n")).unwrap();

  let mut perms = fs::metadata(&path).unwrap().permissions();
  perms.set_mode(0o755);
  fs::set_permissions(&path, perms).unwrap();

  path
}

pub fn count_lines(path: &Path) -> usize {
  fs::read_to_string(path).map(|s| s.lines().count()).unwrap_or(0)
}

pub fn test_config(root: &Path, cases: &[&str]) -> Config {
  let out_dir = root.join("out");
  fs::create_dir_all(&out_dir).unwrap();

  Config {
    out_dir,
    report_file: root.join("report.csv"),
    compiler_cmd: stub_tool(root, "wamrc", COMPILER_STUB),
    runtime_cmd: stub_tool(root, "iwasm", RUNTIME_STUB),
    profdata_cmd: stub_tool(root, "llvm-profdata", PROFDATA_STUB),
    sgx: false,
    warmup_runs: 1,
    timed_runs: 2,
    max_jobs: 2,
    run_timeout: Duration::from_secs(30),
    cases: cases.iter().map(ToString::to_string).collect(),
  }
}
