//! Simulated progress.
//!
//! A heartbeat for the presentation layer, not a measurement: it counts from
//! 0 to 100 at a fixed pace whatever the compiler is doing.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tracing::trace;

use crate::consts::{DEFAULT_PROGRESS_INTERVAL, PROGRESS_MAX};

use super::orchestrator::RunEvent;

/// Pace of the progress simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressPacing {
  /// Delay before each of the 101 steps.
  pub interval: Duration,
}

impl ProgressPacing {
  pub fn new(interval: Duration) -> Self {
    Self { interval }
  }
}

impl Default for ProgressPacing {
  fn default() -> Self {
    Self::new(DEFAULT_PROGRESS_INTERVAL)
  }
}

/// Report steps 0..=100 into `events`.
///
/// Stops early once the receiving side is gone, which happens as soon as the
/// run has reached its terminal state.
pub(crate) async fn simulate(pacing: ProgressPacing, events: UnboundedSender<RunEvent>) {
  for step in 0..=PROGRESS_MAX {
    tokio::time::sleep(pacing.interval).await;
    if events.send(RunEvent::Progress(step)).is_err() {
      trace!(step, "run finished, progress simulation stopped");
      return;
    }
  }
}
