//! End-to-end runs against a stub toolchain: shell scripts stand in for the
//! compiler, runtime and profile-merge tools.

use std::fs;

use wamr_pgo_bench::{
  config::Config,
  report,
  testutil::{self, stub_tool},
};

/// Drops a buildable case into the out dir: a source module plus a native
/// binary that exits successfully.
fn seed_case(config: &Config, case: &str) {
  fs::write(config.out_dir.join(format!("{case}.wasm")), b"\0asm").unwrap();
  stub_tool(&config.out_dir, &format!("{case}_native"), "exit 0");
}

fn report_lines(config: &Config) -> Vec<String> {
  fs::read_to_string(&config.report_file)
    .unwrap()
    .lines()
    .map(ToString::to_string)
    .collect()
}

#[test]
fn full_run_produces_one_sorted_row_per_case() {
  let root = tempfile::tempdir().unwrap();
  let config = testutil::test_config(root.path(), &["b", "a"]);
  seed_case(&config, "a");
  seed_case(&config, "b");

  wamr_pgo_bench::run(&config).unwrap();

  let lines = report_lines(&config);
  assert_eq!(lines.len(), 3);
  assert_eq!(lines[0], report::COLUMNS.join(","));
  assert!(lines[1].starts_with("a,"));
  assert!(lines[2].starts_with("b,"));

  for line in &lines[1..] {
    let fields: Vec<&str> = line.split(',').collect();
    assert_eq!(fields.len(), 13);
    for field in &fields[1..] {
      field.parse::<f64>().expect("numeric field");
    }
  }
}

#[test]
fn case_without_source_module_gets_placeholder_row() {
  let root = tempfile::tempdir().unwrap();
  let config = testutil::test_config(root.path(), &["c", "a"]);
  seed_case(&config, "a");
  // "c" has no .wasm and no native binary

  wamr_pgo_bench::run(&config).unwrap();

  let lines = report_lines(&config);
  assert_eq!(lines.len(), 3);

  let c_row: Vec<&str> = lines[2].split(',').collect();
  assert_eq!(c_row[0], "c");
  assert_eq!(c_row.len(), 13);
  assert!(c_row[1..].iter().all(|field| *field == "NA"));

  // the healthy case is unaffected
  let a_row: Vec<&str> = lines[1].split(',').collect();
  assert_eq!(a_row[0], "a");
  assert!(a_row[1..].iter().all(|field| field.parse::<f64>().is_ok()));
}

#[test]
fn second_run_reuses_artifacts_and_rewrites_the_report() {
  let root = tempfile::tempdir().unwrap();
  let config = testutil::test_config(root.path(), &["a"]);
  seed_case(&config, "a");

  wamr_pgo_bench::run(&config).unwrap();
  let compiles_after_first = testutil::count_lines(&config.out_dir.join("compile.log"));

  wamr_pgo_bench::run(&config).unwrap();
  let compiles_after_second = testutil::count_lines(&config.out_dir.join("compile.log"));

  assert_eq!(compiles_after_first, 3);
  assert_eq!(compiles_after_second, compiles_after_first);

  let lines = report_lines(&config);
  assert_eq!(lines.len(), 2);
}

#[test]
fn empty_suite_produces_header_only_report() {
  let root = tempfile::tempdir().unwrap();
  let config = testutil::test_config(root.path(), &[]);

  wamr_pgo_bench::run(&config).unwrap();

  let lines = report_lines(&config);
  assert_eq!(lines, vec![report::COLUMNS.join(",")]);
}
