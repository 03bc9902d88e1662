//! How the compiler is launched.
//!
//! The compiled arguments are always preceded by a host program and a few
//! leading arguments. By default that is `python -m nuitka`; the host runtime
//! and module name can be overridden through the environment
//! (`NUITKACONV_PYTHON`, `NUITKACONV_COMPILER_MODULE`) or by the caller.

use std::process::Stdio;

use tokio::process::Command;

use crate::consts::{COMPILER_MODULE_ENV, DEFAULT_COMPILER_MODULE, DEFAULT_HOST_RUNTIME, HOST_RUNTIME_ENV};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
  program: String,
  leading_args: Vec<String>,
}

impl Invocation {
  pub fn new<I, S>(program: impl Into<String>, leading_args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      program: program.into(),
      leading_args: leading_args.into_iter().map(Into::into).collect(),
    }
  }

  /// `<host> -m <module>`
  pub fn python_module(host: impl Into<String>, module: impl Into<String>) -> Self {
    Self::new(host, ["-m".to_string(), module.into()])
  }

  /// Default invocation with environment overrides applied.
  ///
  /// Unset or empty variables fall back to `python` and `nuitka`.
  pub fn from_env() -> Self {
    let host = env_value(HOST_RUNTIME_ENV).unwrap_or_else(|| DEFAULT_HOST_RUNTIME.to_string());
    let module = env_value(COMPILER_MODULE_ENV).unwrap_or_else(|| DEFAULT_COMPILER_MODULE.to_string());
    Self::python_module(host, module)
  }

  /// Replace the host program, keeping the leading arguments.
  pub fn with_program(mut self, program: impl Into<String>) -> Self {
    self.program = program.into();
    self
  }

  pub fn program(&self) -> &str {
    &self.program
  }

  pub fn leading_args(&self) -> &[String] {
    &self.leading_args
  }

  /// The full command line for `args`, program first.
  pub fn command_line(&self, args: &[String]) -> Vec<String> {
    std::iter::once(self.program.clone())
      .chain(self.leading_args.iter().cloned())
      .chain(args.iter().cloned())
      .collect()
  }

  pub(crate) fn command(&self, args: &[String]) -> Command {
    let mut command = Command::new(&self.program);
    command
      .args(&self.leading_args)
      .args(args)
      .stdin(Stdio::null())
      .stdout(Stdio::piped())
      .stderr(Stdio::piped())
      .kill_on_drop(false);
    command
  }
}

impl Default for Invocation {
  fn default() -> Self {
    Self::python_module(DEFAULT_HOST_RUNTIME, DEFAULT_COMPILER_MODULE)
  }
}

fn env_value(name: &str) -> Option<String> {
  std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}
