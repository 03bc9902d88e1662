//! Implementation of the `nuitkaconv args` command.
//!
//! Prints the command line a build would run, without running it.

use anyhow::{Context, Result};
use serde::Serialize;

use nuitkaconv_lib::{compile_args, validate};

use crate::options::{OptionArgs, path_warnings};
use crate::output::{OutputFormat, format_command, print_json, print_warning};

#[derive(Serialize)]
struct CommandLine {
  program: String,
  arguments: Vec<String>,
  command: Vec<String>,
}

pub fn cmd_args(args: &OptionArgs, output: OutputFormat) -> Result<()> {
  let options = args.to_build_options()?;
  validate(&options).context("Incomplete build options")?;
  for warning in path_warnings(&options) {
    print_warning(&warning);
  }

  let invocation = args.invocation();
  let arguments = compile_args(&options);
  let command = invocation.command_line(&arguments);

  if output.is_json() {
    print_json(&CommandLine {
      program: invocation.program().to_string(),
      arguments,
      command,
    })?;
  } else {
    println!("{}", format_command(&command));
  }

  Ok(())
}
