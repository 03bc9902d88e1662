//! Shared test helpers for CLI integration tests.

use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Isolated test environment.
///
/// Each test gets its own temporary directory holding the script, the output
/// directory and a stand-in interpreter.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  pub fn new() -> Self {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("app.py"), "print('hello')\n").unwrap();
    Self { temp }
  }

  pub fn path(&self, relative: &str) -> PathBuf {
    self.temp.path().join(relative)
  }

  pub fn script(&self) -> String {
    self.path("app.py").display().to_string()
  }

  pub fn output_dir(&self) -> String {
    self.path("dist").display().to_string()
  }

  /// File the stand-in interpreter records its arguments into, one per line.
  pub fn recorded_args(&self) -> Vec<String> {
    std::fs::read_to_string(self.path("args.txt"))
      .unwrap()
      .lines()
      .map(str::to_string)
      .collect()
  }

  /// Write an executable shell script standing in for the Python interpreter.
  pub fn fake_python(&self, body: &str) -> String {
    let path = self.path("fake-python");
    let record = self.path("args.txt");
    let content = format!(
      "#!/bin/sh\nfor arg in \"$@\"; do printf '%s\\n' \"$arg\" >> '{}'; done\n{}\n",
      record.display(),
      body
    );
    std::fs::write(&path, content).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path.display().to_string()
  }

  /// Get a Command for the nuitkaconv binary rooted in the temp directory.
  pub fn nuitkaconv_cmd(&self) -> Command {
    let mut cmd = cargo_bin_cmd!("nuitkaconv");
    cmd.current_dir(self.temp.path());
    cmd.env_remove("NUITKACONV_PYTHON");
    cmd.env_remove("NUITKACONV_COMPILER_MODULE");
    cmd.env_remove("RUST_LOG");
    cmd
  }
}
