//! Build command integration tests.

use predicates::prelude::*;
use serial_test::serial;

use super::common::TestEnv;

#[test]
#[serial]
fn build_succeeds_with_passing_compiler() {
  let env = TestEnv::new();
  let python = env.fake_python("exit 0");

  env
    .nuitkaconv_cmd()
    .args(["build", &env.script(), "-d", &env.output_dir(), "--standalone"])
    .args(["--python", &python, "--progress-interval", "1ms"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Conversion completed successfully!"))
    .stdout(predicate::str::contains("Elapsed"));

  assert_eq!(
    env.recorded_args(),
    vec![
      "-m".to_string(),
      "nuitka".to_string(),
      "--assume-yes-for-downloads".to_string(),
      "--enable-plugin=tk-inter".to_string(),
      "--standalone".to_string(),
      format!("--output-dir={}", env.output_dir()),
      env.script(),
    ]
  );
}

#[test]
#[serial]
fn build_reports_compiler_failure() {
  let env = TestEnv::new();
  let python = env.fake_python("echo 'fatal: boom' >&2\nexit 3");

  env
    .nuitkaconv_cmd()
    .args(["build", &env.script(), "-d", &env.output_dir()])
    .args(["--python", &python, "--progress-interval", "1ms"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Conversion failed."))
    .stderr(predicate::str::contains("boom"));
}

#[test]
#[serial]
fn build_reports_launch_failure() {
  let env = TestEnv::new();
  let missing = env.path("no-such-python").display().to_string();

  env
    .nuitkaconv_cmd()
    .args(["build", &env.script(), "-d", &env.output_dir()])
    .args(["--python", &missing, "--progress-interval", "1ms"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Conversion failed."))
    .stderr(predicate::str::contains("failed to launch"));
}

#[test]
#[serial]
fn build_json_success_report() {
  let env = TestEnv::new();
  let python = env.fake_python("exit 0");

  let output = env
    .nuitkaconv_cmd()
    .args(["build", &env.script(), "-d", &env.output_dir(), "-o", "json"])
    .args(["--python", &python, "--progress-interval", "1ms"])
    .output()
    .unwrap();

  assert!(output.status.success());
  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(json["outcome"], "succeeded");
  assert_eq!(json["progress"], 100);
  assert_eq!(json["status"], "Conversion completed successfully!");
  assert_eq!(json["command"][0], python.as_str());
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(!stderr.contains("Converting..."), "progress leaked into stderr: {}", stderr);
}

#[test]
#[serial]
fn build_json_failure_report() {
  let env = TestEnv::new();
  let python = env.fake_python("echo 'fatal: boom' >&2\nexit 1");

  let output = env
    .nuitkaconv_cmd()
    .args(["build", &env.script(), "-d", &env.output_dir(), "-o", "json"])
    .args(["--python", &python, "--progress-interval", "1ms"])
    .output()
    .unwrap();

  assert!(!output.status.success());
  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(json["outcome"], "failed");
  assert_eq!(json["progress"], 0);
  assert_eq!(json["status"], "Conversion failed.");
  assert!(json["detail"].as_str().unwrap().contains("boom"));
}

#[test]
#[serial]
fn build_reads_options_file() {
  let env = TestEnv::new();
  let python = env.fake_python("exit 0");
  let options = env.path("build.json");
  std::fs::write(
    &options,
    serde_json::json!({
      "script_path": env.script(),
      "output_dir": env.output_dir(),
      "include_packages": ["requests"],
      "flags": { "onefile": true }
    })
    .to_string(),
  )
  .unwrap();

  env
    .nuitkaconv_cmd()
    .args(["build", "--options", options.to_str().unwrap(), "--lto"])
    .args(["--python", &python, "--progress-interval", "1ms"])
    .assert()
    .success();

  let recorded = env.recorded_args();
  assert!(recorded.contains(&"--onefile".to_string()));
  assert!(recorded.contains(&"--lto=yes".to_string()));
  assert!(recorded.contains(&"--include-package=requests".to_string()));
  assert_eq!(recorded.last(), Some(&env.script()));
}

#[test]
#[serial]
fn build_rejects_malformed_options_file() {
  let env = TestEnv::new();
  let options = env.path("build.json");
  std::fs::write(&options, "{ not json").unwrap();

  env
    .nuitkaconv_cmd()
    .args(["build", "--options", options.to_str().unwrap()])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to load options"));
}
