//! Test utilities for nuitkaconv-lib.
//!
//! Cross-platform helpers for tests that need a stand-in for the compiler.
//! The compiled arguments are appended after the script, so on Unix they land
//! in `$0`, `$1`, ... and can be inspected by the script.

use crate::build::Invocation;

/// An invocation that runs `script` through the platform shell.
#[cfg(unix)]
pub fn shell_invocation(script: &str) -> Invocation {
  Invocation::new("/bin/sh", ["-c".to_string(), script.to_string()])
}

#[cfg(windows)]
pub fn shell_invocation(script: &str) -> Invocation {
  Invocation::new("cmd.exe", ["/C".to_string(), script.to_string()])
}

/// An invocation that sleeps for `secs` and then exits with `code`.
#[cfg(unix)]
pub fn slow_exit(secs: f32, code: i32) -> Invocation {
  shell_invocation(&format!("sleep {}; exit {}", secs, code))
}
