//! Implementation of the `nuitkaconv build` command.
//!
//! Gathers the build options, runs the compiler through the orchestrator and
//! renders the simulated progress until the run reaches its terminal state.

use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::debug;

use nuitkaconv_lib::{BuildOptions, BuildOutcome, Orchestrator, ProgressPacing, RunState};

use crate::options::{OptionArgs, path_warnings};
use crate::output::{
  OutputFormat, ProgressRenderer, format_command, format_duration, print_info, print_json, print_stat, print_success,
  print_warning,
};

#[derive(Serialize)]
struct BuildReport<'a> {
  command: Vec<String>,
  elapsed_ms: u128,
  #[serde(flatten)]
  state: &'a RunState,
}

/// Execute the build command.
///
/// Exits with an error when the options are incomplete, the compiler cannot
/// be launched, or it reports failure.
pub fn cmd_build(args: &OptionArgs, progress_interval: Duration, output: OutputFormat) -> Result<()> {
  let options = args.to_build_options()?;
  for warning in path_warnings(&options) {
    print_warning(&warning);
  }

  let orchestrator = Orchestrator::new(args.invocation(), ProgressPacing::new(progress_interval));

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let started = Instant::now();
  let (command, state) = rt.block_on(run_build(&orchestrator, &options, output))?;
  let elapsed = started.elapsed();

  if output.is_json() {
    print_json(&BuildReport {
      command,
      elapsed_ms: elapsed.as_millis(),
      state: &state,
    })?;
  } else if state.outcome.is_success() {
    print_success(&state.status);
    print_stat("Output", &options.output_dir);
    print_stat("Elapsed", &format_duration(elapsed));
  }

  match state.outcome {
    BuildOutcome::Failed(detail) => bail!("{} {}", state.status, detail),
    _ => Ok(()),
  }
}

async fn run_build(
  orchestrator: &Orchestrator,
  options: &BuildOptions,
  output: OutputFormat,
) -> Result<(Vec<String>, RunState)> {
  let run = orchestrator.start(options).context("Cannot start build")?;
  let command = orchestrator.invocation().command_line(run.arguments());

  if !output.is_json() {
    print_info(&format!("Running {}", format_command(&command)));
  }

  let mut renderer = ProgressRenderer::new(!output.is_json());
  let mut watcher = run.subscribe();
  renderer.render(&watcher.borrow_and_update());

  while watcher.changed().await.is_ok() {
    let state = watcher.borrow_and_update().clone();
    renderer.render(&state);
    if state.outcome.is_terminal() {
      break;
    }
  }
  renderer.finish();

  let outcome = run.wait().await;
  debug!(?outcome, "build finished");

  let mut state = watcher.borrow().clone();
  if !state.outcome.is_terminal() {
    state.outcome = outcome;
  }
  Ok((command, state))
}
