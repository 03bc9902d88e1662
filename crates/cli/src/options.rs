//! Command-line option gathering.
//!
//! Turns clap arguments (and an optional JSON options file) into the
//! [`BuildOptions`] value the library works on.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use nuitkaconv_lib::{BuildFlag, BuildFlags, BuildOptions, Invocation, split_lines};

/// Options shared by every command that assembles a build.
#[derive(Args, Debug, Clone, Default)]
pub struct OptionArgs {
  /// Python script to compile
  pub script: Option<String>,

  /// Directory the compiler writes into
  #[arg(short = 'd', long, value_name = "DIR")]
  pub output_dir: Option<String>,

  /// Extra file bundled verbatim under the same path
  #[arg(long, value_name = "FILE")]
  pub data_file: Option<String>,

  /// Windows icon (.ico)
  #[arg(long, value_name = "FILE")]
  pub icon: Option<String>,

  /// Additional compiler plugin to enable
  #[arg(long, value_name = "NAME")]
  pub plugin: Option<String>,

  /// Package to include (repeatable; a value may hold one name per line)
  #[arg(long = "include-package", value_name = "NAME")]
  pub include_packages: Vec<String>,

  /// Module to include (repeatable; a value may hold one name per line)
  #[arg(long = "include-module", value_name = "NAME")]
  pub include_modules: Vec<String>,

  /// Create a standalone distribution folder (the default without an options file)
  #[arg(long, overrides_with = "no_standalone")]
  pub standalone: bool,

  /// Build against the installed Python instead of a standalone folder
  #[arg(long, overrides_with = "standalone")]
  pub no_standalone: bool,

  /// Pack everything into a single executable
  #[arg(long)]
  pub onefile: bool,

  /// Build with compiler debug checks
  #[arg(long)]
  pub debug: bool,

  /// Enable link time optimization
  #[arg(long)]
  pub lto: bool,

  /// Use the MinGW64 C compiler
  #[arg(long)]
  pub mingw64: bool,

  /// Hide the console window of the built program
  #[arg(long)]
  pub disable_console: bool,

  /// Remove intermediate build files afterwards
  #[arg(long)]
  pub remove_output: bool,

  /// Ask the compiler to prefer source code over bytecode
  #[arg(long)]
  pub no_prefer_source: bool,

  /// Load options from a JSON file; command-line values take precedence
  #[arg(long = "options", value_name = "FILE")]
  pub options_file: Option<PathBuf>,

  /// Python interpreter used to run the compiler
  #[arg(long, value_name = "PATH")]
  pub python: Option<String>,
}

impl OptionArgs {
  /// Build the option value, layering command-line values over the file.
  ///
  /// Without a file, standalone mode starts switched on.
  pub fn to_build_options(&self) -> Result<BuildOptions> {
    let mut options = match &self.options_file {
      Some(path) => BuildOptions::from_json_file(path).context("Failed to load options")?,
      None => BuildOptions {
        flags: BuildFlags {
          standalone: true,
          ..Default::default()
        },
        ..Default::default()
      },
    };

    if let Some(script) = &self.script {
      options.script_path = script.clone();
    }
    if let Some(output_dir) = &self.output_dir {
      options.output_dir = output_dir.clone();
    }
    if self.data_file.is_some() {
      options.data_file = self.data_file.clone();
    }
    if self.icon.is_some() {
      options.icon_file = self.icon.clone();
    }
    if self.plugin.is_some() {
      options.plugin_name = self.plugin.clone();
    }

    options.include_packages = merge_entries(&options.include_packages, &self.include_packages);
    options.include_modules = merge_entries(&options.include_modules, &self.include_modules);

    for (flag, set) in self.flags() {
      if set {
        options.flags.set(flag, true);
      }
    }
    if self.no_standalone {
      options.flags.set(BuildFlag::Standalone, false);
    }

    Ok(options)
  }

  /// Invocation from the environment, with `--python` applied.
  pub fn invocation(&self) -> Invocation {
    let invocation = Invocation::from_env();
    match &self.python {
      Some(python) => invocation.with_program(python.clone()),
      None => invocation,
    }
  }

  fn flags(&self) -> [(BuildFlag, bool); 8] {
    [
      (BuildFlag::Standalone, self.standalone),
      (BuildFlag::Onefile, self.onefile),
      (BuildFlag::Debug, self.debug),
      (BuildFlag::Lto, self.lto),
      (BuildFlag::UseMinGw, self.mingw64),
      (BuildFlag::DisableConsole, self.disable_console),
      (BuildFlag::RemoveOutput, self.remove_output),
      (BuildFlag::NoPreferSource, self.no_prefer_source),
    ]
  }
}

/// File entries first, then command-line entries, each value split by line.
fn merge_entries(from_file: &[String], from_args: &[String]) -> Vec<String> {
  from_file
    .iter()
    .chain(from_args)
    .flat_map(|raw| split_lines(raw))
    .collect()
}

/// Non-fatal remarks about the chosen paths.
///
/// These mirror the file filters a picker dialog would apply. They never
/// block a build.
pub fn path_warnings(options: &BuildOptions) -> Vec<String> {
  let mut warnings = Vec::new();

  if !options.script_path.is_empty() {
    let script = Path::new(&options.script_path);
    if !script.exists() {
      warnings.push(format!("Script not found: {}", options.script_path));
    } else if !has_extension(script, &["py", "pyw"]) {
      warnings.push(format!("Script does not look like a Python file: {}", options.script_path));
    }
  }

  if let Some(data_file) = options.data_file()
    && !Path::new(data_file).exists()
  {
    warnings.push(format!("Data file not found: {}", data_file));
  }

  if let Some(icon) = options.icon_file() {
    let path = Path::new(icon);
    if !path.exists() {
      warnings.push(format!("Icon file not found: {}", icon));
    } else if !has_extension(path, &["ico"]) {
      warnings.push(format!("Icon is not an .ico file: {}", icon));
    }
  }

  warnings
}

fn has_extension(path: &Path, allowed: &[&str]) -> bool {
  path
    .extension()
    .and_then(|ext| ext.to_str())
    .is_some_and(|ext| allowed.iter().any(|a| ext.eq_ignore_ascii_case(a)))
}
