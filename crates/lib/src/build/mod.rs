//! Build invocation workflow.
//!
//! Validates options, launches the compiler with the compiled arguments and
//! reports progress and outcome while it runs.
//!
//! # Submodules
//!
//! - [`invocation`] - host program and leading arguments
//! - [`orchestrator`] - run lifecycle, one build at a time
//! - [`process`] - compiler process supervision
//! - [`progress`] - simulated progress heartbeat

pub mod invocation;
pub mod orchestrator;
mod process;
pub mod progress;
mod types;

pub use invocation::Invocation;
pub use orchestrator::{BuildRun, Orchestrator, validate};
pub use progress::ProgressPacing;
pub use types::*;
