//! nuitkaconv-lib: Core types and logic for nuitkaconv
//!
//! This crate turns user-selected build options into a Nuitka command line
//! and runs it:
//! - `options`: the `BuildOptions` value supplied by a front-end
//! - `args`: the argument compiler, a pure function of the options
//! - `build`: validation, process launch, simulated progress and outcome

pub mod args;
pub mod build;
pub mod consts;
pub mod options;

#[cfg(test)]
mod util;

pub use args::compile_args;
pub use build::{BuildOutcome, BuildRun, Invocation, Orchestrator, ProgressPacing, RunState, StartError, validate};
pub use options::{BuildFlag, BuildFlags, BuildOptions, split_lines};
