use std::process::ExitStatus;

use serde::Serialize;
use thiserror::Error;

use crate::consts::{PROGRESS_MAX, STATUS_CONVERTING, STATUS_FAILED, STATUS_SUCCEEDED};

/// A required option is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("Please select a Python script file")]
  MissingScript,

  #[error("Please select an output directory")]
  MissingOutputDir,
}

/// Reasons a build could not be started.
#[derive(Debug, Error)]
pub enum StartError {
  #[error(transparent)]
  Validation(#[from] ValidationError),

  /// Another run of the same orchestrator has not finished yet.
  #[error("a build is already running")]
  AlreadyRunning,
}

/// Failures of the external compiler process.
#[derive(Debug, Error)]
pub enum RunError {
  /// The process could not be created.
  #[error("failed to launch '{program}': {source}")]
  Launch {
    program: String,
    #[source]
    source: std::io::Error,
  },

  /// The process was created but waiting on it failed.
  #[error("failed to wait for '{program}': {source}")]
  Wait {
    program: String,
    #[source]
    source: std::io::Error,
  },

  /// The process ran and reported failure.
  #[error("command '{command}' returned non-zero {status}{}", stderr_suffix(.stderr))]
  Exit {
    command: String,
    status: ExitStatus,
    stderr: String,
  },
}

fn stderr_suffix(stderr: &str) -> String {
  if stderr.is_empty() {
    String::new()
  } else {
    format!("\n{}", stderr)
  }
}

/// Where a run currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum BuildOutcome {
  Running,
  Succeeded,
  /// Carries a human-readable description of what went wrong.
  Failed(String),
}

impl BuildOutcome {
  pub fn is_terminal(&self) -> bool {
    !matches!(self, BuildOutcome::Running)
  }

  pub fn is_success(&self) -> bool {
    matches!(self, BuildOutcome::Succeeded)
  }

  pub fn detail(&self) -> Option<&str> {
    match self {
      BuildOutcome::Failed(detail) => Some(detail),
      _ => None,
    }
  }
}

/// Observable state of one run, as published to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunState {
  /// Simulated progress, 0 to 100.
  pub progress: u8,

  /// Short status line.
  pub status: String,

  #[serde(flatten)]
  pub outcome: BuildOutcome,
}

impl RunState {
  pub(crate) fn started() -> Self {
    Self {
      progress: 0,
      status: STATUS_CONVERTING.to_string(),
      outcome: BuildOutcome::Running,
    }
  }

  pub(crate) fn succeed(&mut self) {
    self.progress = PROGRESS_MAX;
    self.status = STATUS_SUCCEEDED.to_string();
    self.outcome = BuildOutcome::Succeeded;
  }

  pub(crate) fn fail(&mut self, detail: String) {
    self.progress = 0;
    self.status = STATUS_FAILED.to_string();
    self.outcome = BuildOutcome::Failed(detail);
  }
}
