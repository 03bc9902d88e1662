//! Build option model.
//!
//! [`BuildOptions`] is the value a front-end hands to the orchestrator. It is
//! plain data: every field is filled in by the caller and nothing is derived
//! or cached on it. Multi-line text inputs (package and module lists) are
//! turned into entries with [`split_lines`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading options from a file.
#[derive(Debug, Error)]
pub enum OptionsError {
  #[error("failed to read options file {path}: {source}")]
  Read {
    path: String,
    #[source]
    source: std::io::Error,
  },

  #[error("invalid options file {path}: {source}")]
  Parse {
    path: String,
    #[source]
    source: serde_json::Error,
  },
}

/// A single boolean build switch.
///
/// Variants are listed in the order their arguments are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildFlag {
  Standalone,
  Onefile,
  Debug,
  Lto,
  UseMinGw,
  DisableConsole,
  RemoveOutput,
  NoPreferSource,
}

impl BuildFlag {
  pub const ALL: [BuildFlag; 8] = [
    BuildFlag::Standalone,
    BuildFlag::Onefile,
    BuildFlag::Debug,
    BuildFlag::Lto,
    BuildFlag::UseMinGw,
    BuildFlag::DisableConsole,
    BuildFlag::RemoveOutput,
    BuildFlag::NoPreferSource,
  ];

  /// The compiler argument this flag contributes when set.
  pub fn token(self) -> &'static str {
    match self {
      BuildFlag::Standalone => "--standalone",
      BuildFlag::Onefile => "--onefile",
      BuildFlag::Debug => "--debug",
      BuildFlag::Lto => "--lto=yes",
      BuildFlag::UseMinGw => "--mingw64",
      BuildFlag::DisableConsole => "--windows-console-mode=disable",
      BuildFlag::RemoveOutput => "--remove-output",
      // The checkbox reads "No Prefer Source" but the compiler switch it has
      // always produced is the positive one.
      BuildFlag::NoPreferSource => "--prefer-source-code",
    }
  }
}

impl std::fmt::Display for BuildFlag {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let name = match self {
      BuildFlag::Standalone => "standalone",
      BuildFlag::Onefile => "onefile",
      BuildFlag::Debug => "debug",
      BuildFlag::Lto => "lto",
      BuildFlag::UseMinGw => "use_mingw",
      BuildFlag::DisableConsole => "disable_console",
      BuildFlag::RemoveOutput => "remove_output",
      BuildFlag::NoPreferSource => "no_prefer_source",
    };
    f.write_str(name)
  }
}

/// The independent boolean switches of a build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildFlags {
  pub standalone: bool,
  pub onefile: bool,
  pub debug: bool,
  pub lto: bool,
  pub use_mingw: bool,
  pub disable_console: bool,
  pub remove_output: bool,
  pub no_prefer_source: bool,
}

impl BuildFlags {
  pub fn is_set(&self, flag: BuildFlag) -> bool {
    match flag {
      BuildFlag::Standalone => self.standalone,
      BuildFlag::Onefile => self.onefile,
      BuildFlag::Debug => self.debug,
      BuildFlag::Lto => self.lto,
      BuildFlag::UseMinGw => self.use_mingw,
      BuildFlag::DisableConsole => self.disable_console,
      BuildFlag::RemoveOutput => self.remove_output,
      BuildFlag::NoPreferSource => self.no_prefer_source,
    }
  }

  pub fn set(&mut self, flag: BuildFlag, value: bool) {
    let slot = match flag {
      BuildFlag::Standalone => &mut self.standalone,
      BuildFlag::Onefile => &mut self.onefile,
      BuildFlag::Debug => &mut self.debug,
      BuildFlag::Lto => &mut self.lto,
      BuildFlag::UseMinGw => &mut self.use_mingw,
      BuildFlag::DisableConsole => &mut self.disable_console,
      BuildFlag::RemoveOutput => &mut self.remove_output,
      BuildFlag::NoPreferSource => &mut self.no_prefer_source,
    };
    *slot = value;
  }

  /// Flags that are set, in declaration order.
  pub fn enabled(&self) -> impl Iterator<Item = BuildFlag> + '_ {
    BuildFlag::ALL.into_iter().filter(|flag| self.is_set(*flag))
  }
}

/// Everything needed to compile one script.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildOptions {
  pub script_path: String,
  pub output_dir: String,
  pub data_file: Option<String>,
  pub icon_file: Option<String>,
  pub plugin_name: Option<String>,
  pub include_packages: Vec<String>,
  pub include_modules: Vec<String>,
  pub flags: BuildFlags,
}

impl BuildOptions {
  pub fn new(script_path: impl Into<String>, output_dir: impl Into<String>) -> Self {
    Self {
      script_path: script_path.into(),
      output_dir: output_dir.into(),
      ..Default::default()
    }
  }

  /// Load options from a JSON file.
  ///
  /// Fields missing from the file keep their defaults (empty or false).
  pub fn from_json_file(path: &Path) -> Result<Self, OptionsError> {
    let content = std::fs::read_to_string(path).map_err(|source| OptionsError::Read {
      path: path.display().to_string(),
      source,
    })?;

    serde_json::from_str(&content).map_err(|source| OptionsError::Parse {
      path: path.display().to_string(),
      source,
    })
  }

  pub fn data_file(&self) -> Option<&str> {
    non_empty(self.data_file.as_deref())
  }

  pub fn icon_file(&self) -> Option<&str> {
    non_empty(self.icon_file.as_deref())
  }

  pub fn plugin_name(&self) -> Option<&str> {
    non_empty(self.plugin_name.as_deref())
  }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
  value.filter(|v| !v.is_empty())
}

/// Split raw multi-line input into list entries.
///
/// Each line is trimmed and blank lines are dropped; order is preserved.
pub fn split_lines(raw: &str) -> Vec<String> {
  raw
    .lines()
    .map(str::trim)
    .filter(|line| !line.is_empty())
    .map(str::to_string)
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  #[test]
  fn split_lines_trims_and_drops_blanks() {
    let entries = split_lines("customtkinter\n\n  uiautomator2  \n\t\nrequests\r\n");
    assert_eq!(entries, vec!["customtkinter", "uiautomator2", "requests"]);
  }

  #[test]
  fn split_lines_empty_input() {
    assert!(split_lines("").is_empty());
    assert!(split_lines("   \n \n").is_empty());
  }

  #[test]
  fn flags_enabled_follow_declaration_order() {
    let mut flags = BuildFlags::default();
    flags.set(BuildFlag::NoPreferSource, true);
    flags.set(BuildFlag::Standalone, true);
    flags.set(BuildFlag::Lto, true);

    let enabled: Vec<_> = flags.enabled().collect();
    assert_eq!(
      enabled,
      vec![BuildFlag::Standalone, BuildFlag::Lto, BuildFlag::NoPreferSource]
    );
  }

  #[test]
  fn optional_fields_treat_empty_as_absent() {
    let mut options = BuildOptions::new("app.py", "dist");
    options.data_file = Some(String::new());
    options.icon_file = Some("app.ico".to_string());

    assert_eq!(options.data_file(), None);
    assert_eq!(options.icon_file(), Some("app.ico"));
    assert_eq!(options.plugin_name(), None);
  }

  #[test]
  fn load_options_from_json() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("options.json");
    std::fs::write(
      &path,
      r#"{
        "script_path": "main.py",
        "output_dir": "build",
        "include_packages": ["requests"],
        "flags": { "onefile": true }
      }"#,
    )
    .unwrap();

    let options = BuildOptions::from_json_file(&path).unwrap();

    assert_eq!(options.script_path, "main.py");
    assert_eq!(options.output_dir, "build");
    assert_eq!(options.include_packages, vec!["requests"]);
    assert!(options.flags.onefile);
    assert!(!options.flags.standalone);
    assert!(options.icon_file.is_none());
  }

  #[test]
  fn load_options_rejects_unknown_field() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("options.json");
    std::fs::write(&path, r#"{ "script_path": "main.py", "follow_imports": true }"#).unwrap();

    let err = BuildOptions::from_json_file(&path).unwrap_err();
    assert!(matches!(err, OptionsError::Parse { .. }));
  }

  #[test]
  fn load_options_missing_file() {
    let err = BuildOptions::from_json_file(Path::new("/nonexistent/options.json")).unwrap_err();
    assert!(matches!(err, OptionsError::Read { .. }));
  }
}
