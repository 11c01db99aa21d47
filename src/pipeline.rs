use std::{
  path::{Path, PathBuf},
  process::Command,
};

use log::{debug, info, warn};

use crate::{
  config::Config,
  error::BenchError,
  ext::CommandExt,
};

/// Derived files for one case, keyed by role. Existence on disk is the sole
/// state signal; an artifact already present is never regenerated.
pub struct Artifacts {
  dir: PathBuf,
  case: String,
}

impl Artifacts {
  pub fn new(config: &Config, case: &str) -> Self {
    // children run with the out dir as their cwd, so artifact paths handed
    // to them must already be absolute or they resolve against it twice
    let dir = std::path::absolute(&config.out_dir).unwrap_or_else(|_| config.out_dir.clone());

    Self {
      dir,
      case: case.to_string(),
    }
  }

  /// Source module, produced by the external suite build.
  pub fn wasm(&self) -> PathBuf {
    self.dir.join(format!("{}.wasm", self.case))
  }

  /// Native binary, produced by the external suite build.
  pub fn native(&self) -> PathBuf {
    self.dir.join(format!("{}_native", self.case))
  }

  pub fn aot(&self) -> PathBuf {
    self.dir.join(format!("{}.aot", self.case))
  }

  /// Instrumented AOT build used only to collect the raw profile.
  pub fn pgo_aot(&self) -> PathBuf {
    self.dir.join(format!("{}_pgo.aot", self.case))
  }

  pub fn profraw(&self) -> PathBuf {
    self.dir.join(format!("{}.profraw", self.case))
  }

  pub fn profdata(&self) -> PathBuf {
    self.dir.join(format!("{}.profdata", self.case))
  }

  /// Final profile-guided AOT build.
  pub fn opt_aot(&self) -> PathBuf {
    self.dir.join(format!("{}_opt.aot", self.case))
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
  /// The build ran and produced the output.
  Built,
  /// The output already existed; nothing was invoked.
  Skipped,
  /// A required input was absent, so the build was not attempted.
  MissingInput,
  /// The build ran and failed.
  Failed,
}

/// One resumable pipeline step: declared inputs, one output, and a build
/// action run only when the output is absent and every input is present.
struct Step {
  name: &'static str,
  inputs: Vec<PathBuf>,
  output: PathBuf,
}

impl Step {
  fn execute(&self, case: &str, build: impl FnOnce() -> Result<(), BenchError>) -> StepOutcome {
    if self.output.exists() {
      debug!("{case}: {}: {:?} already exists, skipping", self.name, self.output);

      return StepOutcome::Skipped;
    }

    for input in &self.inputs {
      if !input.exists() {
        let err = BenchError::PreconditionMissing { path: input.clone() };
        warn!("{case}: {}: {err}", self.name);

        return StepOutcome::MissingInput;
      }
    }

    match build() {
      Ok(()) => StepOutcome::Built,
      Err(err) => {
        warn!("{case}: {}: {err}", self.name);

        StepOutcome::Failed
      }
    }
  }
}

/// Per-case pipeline outcome. A failed step never aborts the remaining
/// steps; steps depending on its output record `MissingInput` instead.
pub struct CaseReport {
  pub case: String,
  pub source_present: bool,
  pub steps: Vec<(&'static str, StepOutcome)>,
}

impl CaseReport {
  /// Number of steps that actually invoked an external tool.
  pub fn invocations(&self) -> usize {
    self.steps.iter().filter(|(_, outcome)| *outcome == StepOutcome::Built).count()
  }
}

/// Drives the ordered build/profile/optimize steps for one case. Reports
/// every failure but keeps going so a partial artifact set is preserved;
/// the timing phase surfaces any variant it cannot run.
pub fn prepare(config: &Config, case: &str) -> CaseReport {
  let artifacts = Artifacts::new(config, case);

  let wasm = artifacts.wasm();
  if !wasm.exists() {
    let err = BenchError::PreconditionMissing { path: wasm };
    warn!("{case}: {err}; run the suite build first");

    return CaseReport {
      case: case.to_string(),
      source_present: false,
      steps: Vec::new(),
    };
  }

  let mut steps = Vec::new();

  let aot = Step {
    name: "compile-aot",
    inputs: vec![artifacts.wasm()],
    output: artifacts.aot(),
  };
  steps.push((aot.name, aot.execute(case, || compile(config, &artifacts.wasm(), &artifacts.aot(), &[]))));

  let pgo_aot = Step {
    name: "compile-instrumented",
    inputs: vec![artifacts.wasm()],
    output: artifacts.pgo_aot(),
  };
  steps.push((pgo_aot.name, pgo_aot.execute(case, || {
    compile(config, &artifacts.wasm(), &artifacts.pgo_aot(), &["--enable-llvm-pgo".to_string()])
  })));

  let profraw = Step {
    name: "collect-profile",
    inputs: vec![artifacts.pgo_aot()],
    output: artifacts.profraw(),
  };
  steps.push((profraw.name, profraw.execute(case, || {
    collect_profile(config, &artifacts.pgo_aot(), &artifacts.profraw())
  })));

  let profdata = Step {
    name: "merge-profile",
    inputs: vec![artifacts.profraw()],
    output: artifacts.profdata(),
  };
  steps.push((profdata.name, profdata.execute(case, || {
    merge_profile(config, &artifacts.profraw(), &artifacts.profdata())
  })));

  let opt_aot = Step {
    name: "compile-pgo",
    inputs: vec![artifacts.wasm(), artifacts.profdata()],
    output: artifacts.opt_aot(),
  };
  steps.push((opt_aot.name, opt_aot.execute(case, || {
    let use_profile = format!("--use-prof-file={}", artifacts.profdata().display());
    compile(config, &artifacts.wasm(), &artifacts.opt_aot(), &[use_profile])
  })));

  CaseReport {
    case: case.to_string(),
    source_present: true,
    steps,
  }
}

fn compile(config: &Config, input: &Path, output: &Path, extra: &[String]) -> Result<(), BenchError> {
  let mut command = Command::new(&config.compiler_cmd);
  command
    .current_dir(&config.out_dir)
    .args(config.compiler_base_args())
    .args(extra)
    .arg("-o")
    .arg(output)
    .arg(input);

  info!("compiling {input:?} -> {output:?}");
  command.run_checked()?;

  Ok(())
}

/// Runs the instrumented build once under the runtime's profiling mode,
/// emitting the raw profile as a side effect.
fn collect_profile(config: &Config, pgo_aot: &Path, profraw: &Path) -> Result<(), BenchError> {
  let mut command = Command::new(&config.runtime_cmd);
  command
    .current_dir(&config.out_dir)
    .arg(format!("--gen-prof-file={}", profraw.display()))
    .arg("--dir=.")
    .arg(pgo_aot);

  info!("profiling {pgo_aot:?} -> {profraw:?}");
  command.run_checked()?;

  Ok(())
}

fn merge_profile(config: &Config, profraw: &Path, profdata: &Path) -> Result<(), BenchError> {
  let mut command = Command::new(&config.profdata_cmd);
  command
    .current_dir(&config.out_dir)
    .arg("merge")
    .arg(format!("-output={}", profdata.display()))
    .arg(profraw);

  info!("merging {profraw:?} -> {profdata:?}");
  command.run_checked()?;

  Ok(())
}
