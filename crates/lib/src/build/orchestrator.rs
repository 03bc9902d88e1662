//! Build orchestration.
//!
//! A run is three tasks:
//!
//! - the supervisor, which launches the compiler and waits for it
//! - the progress simulation, which ticks from 0 to 100 on its own clock
//! - the driver, which owns the published [`RunState`]
//!
//! The first two only send [`RunEvent`]s; the driver is the sole writer of
//! progress, status and outcome. When the supervisor reports the exit, the
//! driver writes the terminal state and drops its receiver, so no later
//! progress tick can overwrite the forced 100 (or 0).

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::args::compile_args;
use crate::options::BuildOptions;

use super::invocation::Invocation;
use super::process::run_compiler;
use super::progress::{ProgressPacing, simulate};
use super::types::{BuildOutcome, RunError, RunState, StartError, ValidationError};

/// Messages reported into a run's driver.
#[derive(Debug)]
pub(crate) enum RunEvent {
  Progress(u8),
  Exited(Result<(), RunError>),
}

/// Check that the required options are present.
///
/// Only presence is checked; paths are not looked up on disk.
pub fn validate(options: &BuildOptions) -> Result<(), ValidationError> {
  if options.script_path.is_empty() {
    return Err(ValidationError::MissingScript);
  }
  if options.output_dir.is_empty() {
    return Err(ValidationError::MissingOutputDir);
  }
  Ok(())
}

/// Launches builds, one at a time.
#[derive(Debug)]
pub struct Orchestrator {
  invocation: Invocation,
  pacing: ProgressPacing,
  active: Arc<AtomicBool>,
}

impl Orchestrator {
  pub fn new(invocation: Invocation, pacing: ProgressPacing) -> Self {
    Self {
      invocation,
      pacing,
      active: Arc::new(AtomicBool::new(false)),
    }
  }

  pub fn invocation(&self) -> &Invocation {
    &self.invocation
  }

  /// Whether a run started by this orchestrator is still in flight.
  pub fn is_running(&self) -> bool {
    self.active.load(Ordering::Acquire)
  }

  /// Validate `options` and start a build.
  ///
  /// Returns as soon as the run is under way; observe it through the returned
  /// [`BuildRun`]. A request made while another run is in flight is rejected
  /// with [`StartError::AlreadyRunning`] and leaves that run untouched.
  ///
  /// Must be called from within a Tokio runtime.
  pub fn start(&self, options: &BuildOptions) -> Result<BuildRun, StartError> {
    validate(options)?;

    let claim = RunClaim::acquire(&self.active).ok_or_else(|| {
      warn!(script = %options.script_path, "build rejected, another build is running");
      StartError::AlreadyRunning
    })?;

    let arguments = compile_args(options);
    info!(
      script = %options.script_path,
      output_dir = %options.output_dir,
      program = %self.invocation.program(),
      "starting build"
    );
    debug!(command = ?self.invocation.command_line(&arguments), "compiled command line");

    let (state_tx, state_rx) = watch::channel(RunState::started());
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    tokio::spawn(simulate(self.pacing, event_tx.clone()));
    tokio::spawn(supervise(self.invocation.clone(), arguments.clone(), event_tx));
    let driver = tokio::spawn(drive(event_rx, state_tx, claim));

    Ok(BuildRun {
      arguments,
      state: state_rx,
      driver,
    })
  }
}

impl Default for Orchestrator {
  fn default() -> Self {
    Self::new(Invocation::from_env(), ProgressPacing::default())
  }
}

/// Handle on one in-flight build.
#[derive(Debug)]
pub struct BuildRun {
  arguments: Vec<String>,
  state: watch::Receiver<RunState>,
  driver: JoinHandle<BuildOutcome>,
}

impl BuildRun {
  /// The compiled arguments this run was launched with.
  pub fn arguments(&self) -> &[String] {
    &self.arguments
  }

  /// Snapshot of the current state.
  pub fn state(&self) -> RunState {
    self.state.borrow().clone()
  }

  /// A receiver notified on every state change.
  pub fn subscribe(&self) -> watch::Receiver<RunState> {
    self.state.clone()
  }

  /// Wait for the run to reach its terminal state.
  pub async fn wait(self) -> BuildOutcome {
    match self.driver.await {
      Ok(outcome) => outcome,
      Err(err) => BuildOutcome::Failed(format!("build driver stopped unexpectedly: {}", err)),
    }
  }
}

/// Exclusive claim on an orchestrator, released on drop.
#[derive(Debug)]
struct RunClaim {
  active: Arc<AtomicBool>,
}

impl RunClaim {
  fn acquire(active: &Arc<AtomicBool>) -> Option<Self> {
    active
      .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
      .ok()
      .map(|_| Self {
        active: Arc::clone(active),
      })
  }
}

impl Drop for RunClaim {
  fn drop(&mut self) {
    self.active.store(false, Ordering::Release);
  }
}

async fn supervise(invocation: Invocation, arguments: Vec<String>, events: mpsc::UnboundedSender<RunEvent>) {
  let result = run_compiler(&invocation, &arguments).await;
  // The driver only goes away after receiving this.
  let _ = events.send(RunEvent::Exited(result));
}

async fn drive(
  mut events: mpsc::UnboundedReceiver<RunEvent>,
  state: watch::Sender<RunState>,
  _claim: RunClaim,
) -> BuildOutcome {
  while let Some(event) = events.recv().await {
    match event {
      RunEvent::Progress(step) => {
        state.send_if_modified(|current| {
          if step > current.progress {
            current.progress = step;
            true
          } else {
            false
          }
        });
      }
      RunEvent::Exited(Ok(())) => {
        info!("build succeeded");
        state.send_modify(RunState::succeed);
        return BuildOutcome::Succeeded;
      }
      RunEvent::Exited(Err(err)) => {
        warn!(error = %err, "build failed");
        let detail = err.to_string();
        state.send_modify(|current| current.fail(detail.clone()));
        return BuildOutcome::Failed(detail);
      }
    }
  }

  // Both senders gone without an exit report: the supervisor panicked.
  let detail = "build supervisor stopped without reporting an exit status".to_string();
  error!("{}", detail);
  state.send_modify(|current| current.fail(detail.clone()));
  BuildOutcome::Failed(detail)
}
