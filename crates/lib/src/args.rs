//! Argument compiler.
//!
//! Turns a [`BuildOptions`] value into the argument list handed to the
//! compiler. The output order is fixed:
//!
//! 1. the baseline arguments
//! 2. one token per set flag, in [`BuildFlag`](crate::options::BuildFlag) declaration order
//! 3. `--include-package=` entries, then `--include-module=` entries
//! 4. output dir, data file, icon and plugin, each only when non-empty
//! 5. the script path
//!
//! The compiler takes the script as its trailing positional argument, so it
//! always comes last.

use crate::consts::BASELINE_ARGS;
use crate::options::BuildOptions;

/// Compile build options into compiler arguments.
///
/// Pure and infallible; required fields are checked by
/// [`validate`](crate::build::validate) before this runs.
pub fn compile_args(options: &BuildOptions) -> Vec<String> {
  let mut args: Vec<String> = BASELINE_ARGS.iter().map(|arg| arg.to_string()).collect();

  args.extend(options.flags.enabled().map(|flag| flag.token().to_string()));

  args.extend(entries(&options.include_packages).map(|pkg| format!("--include-package={}", pkg)));
  args.extend(entries(&options.include_modules).map(|module| format!("--include-module={}", module)));

  if !options.output_dir.is_empty() {
    args.push(format!("--output-dir={}", options.output_dir));
  }
  if let Some(data_file) = options.data_file() {
    args.push(format!("--include-data-file={}={}", data_file, data_file));
  }
  if let Some(icon_file) = options.icon_file() {
    args.push(format!("--windows-icon-from-ico={}", icon_file));
  }
  if let Some(plugin) = options.plugin_name() {
    args.push(format!("--enable-plugin={}", plugin));
  }

  args.push(options.script_path.clone());
  args
}

fn entries(list: &[String]) -> impl Iterator<Item = &str> {
  list.iter().map(|entry| entry.trim()).filter(|entry| !entry.is_empty())
}
