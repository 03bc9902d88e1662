mod cmd;
mod options;
mod output;

use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::options::OptionArgs;
use crate::output::{OutputFormat, print_error};

/// nuitkaconv - Turn Python scripts into executables with Nuitka
#[derive(Parser)]
#[command(name = "nuitkaconv")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Compile a Python script, showing progress until the compiler exits
  Build {
    #[command(flatten)]
    options: OptionArgs,

    /// Delay between simulated progress steps (e.g. 100ms, 1s)
    #[arg(long, value_name = "DURATION", value_parser = humantime::parse_duration, default_value = "100ms")]
    progress_interval: Duration,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    output: OutputFormat,
  },

  /// Print the compiler command line without running it
  Args {
    #[command(flatten)]
    options: OptionArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    output: OutputFormat,
  },

  /// Show a short usage guide
  Guide,
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
    if cli.verbose {
      EnvFilter::new("debug")
    } else {
      EnvFilter::new("error")
    }
  });
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let result = match cli.command {
    Commands::Build {
      options,
      progress_interval,
      output,
    } => cmd::cmd_build(&options, progress_interval, output),
    Commands::Args { options, output } => cmd::cmd_args(&options, output),
    Commands::Guide => {
      cmd::cmd_guide();
      Ok(())
    }
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&format!("{:#}", err));
      ExitCode::FAILURE
    }
  }
}
