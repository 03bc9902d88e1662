//! CLI output formatting utilities.
//!
//! Provides consistent formatting for terminal output including colored status
//! messages, the progress line, shell quoting and duration formatting.

use std::io::{IsTerminal, Write};
use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};

use nuitkaconv_lib::{BuildOutcome, RunState};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const WARNING: &str = "⚠";
  pub const INFO: &str = "•";
  pub const ARROW: &str = "→";
}

const BAR_WIDTH: usize = 40;

pub fn format_duration(duration: Duration) -> String {
  let secs = duration.as_secs();
  let millis = duration.subsec_millis();

  if secs >= 60 {
    let mins = secs / 60;
    let remaining_secs = secs % 60;
    format!("{}m {}s", mins, remaining_secs)
  } else if secs > 0 {
    format!("{}.{:02}s", secs, millis / 10)
  } else {
    format!("{}ms", millis)
  }
}

/// Quote an argument for display so it can be pasted into a POSIX shell.
pub fn shell_quote(arg: &str) -> String {
  let safe = !arg.is_empty()
    && arg
      .chars()
      .all(|c| c.is_ascii_alphanumeric() || "-_=./:,+@%".contains(c));

  if safe {
    arg.to_string()
  } else {
    format!("'{}'", arg.replace('\'', r"'\''"))
  }
}

pub fn format_command(command: &[String]) -> String {
  command.iter().map(|arg| shell_quote(arg)).collect::<Vec<_>>().join(" ")
}

/// `[#####-----]` for a 0-100 value.
pub fn progress_bar(progress: u8, width: usize) -> String {
  let filled = (usize::from(progress.min(100)) * width) / 100;
  format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// Renders run state to stderr.
///
/// On a terminal the progress line is redrawn in place; otherwise only status
/// changes are printed, one per line. A disabled renderer prints nothing.
pub struct ProgressRenderer {
  enabled: bool,
  interactive: bool,
  drawn: bool,
  last_status: Option<String>,
}

impl ProgressRenderer {
  pub fn new(enabled: bool) -> Self {
    Self {
      enabled,
      interactive: enabled && std::io::stderr().is_terminal(),
      drawn: false,
      last_status: None,
    }
  }

  pub fn render(&mut self, state: &RunState) {
    if !self.enabled {
      return;
    }
    if self.interactive {
      let bar = progress_bar(state.progress, BAR_WIDTH);
      let bar = if matches!(state.outcome, BuildOutcome::Failed(_)) {
        bar.red().to_string()
      } else {
        bar.blue().to_string()
      };
      let mut stderr = std::io::stderr();
      let _ = write!(stderr, "\r\x1b[2K{} {:>3}% {}", bar, state.progress, state.status);
      let _ = stderr.flush();
      self.drawn = true;
    } else if self.last_status.as_deref() != Some(state.status.as_str()) {
      eprintln!(
        "{} {}",
        symbols::ARROW.if_supports_color(Stream::Stderr, |s| s.cyan()),
        state.status
      );
    }
    self.last_status = Some(state.status.clone());
  }

  pub fn finish(&mut self) {
    if self.drawn {
      eprintln!();
      self.drawn = false;
    }
  }
}

pub fn print_success(message: &str) {
  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    symbols::ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
    message.if_supports_color(Stream::Stderr, |s| s.red())
  );
}

pub fn print_warning(message: &str) {
  eprintln!(
    "{} {}",
    symbols::WARNING.if_supports_color(Stream::Stderr, |s| s.yellow()),
    message.if_supports_color(Stream::Stderr, |s| s.yellow())
  );
}

pub fn print_info(message: &str) {
  println!(
    "{} {}",
    symbols::INFO.if_supports_color(Stream::Stdout, |s| s.blue()),
    message
  );
}

pub fn print_stat(label: &str, value: &str) {
  println!(
    "  {}: {}",
    label.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    value
  );
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_format_duration() {
    assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
    assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
    assert_eq!(format_duration(Duration::from_secs(65)), "1m 5s");
  }

  #[test]
  fn test_shell_quote() {
    assert_eq!(shell_quote("--output-dir=dist"), "--output-dir=dist");
    assert_eq!(shell_quote("my app.py"), "'my app.py'");
    assert_eq!(shell_quote("it's"), r"'it'\''s'");
    assert_eq!(shell_quote(""), "''");
  }

  #[test]
  fn test_format_command() {
    let command = vec!["python".to_string(), "-m".to_string(), "nuitka".to_string(), "a b.py".to_string()];
    assert_eq!(format_command(&command), "python -m nuitka 'a b.py'");
  }

  #[test]
  fn test_disabled_renderer_draws_nothing() {
    let mut renderer = ProgressRenderer::new(false);
    let state = RunState {
      progress: 42,
      status: "Converting...".to_string(),
      outcome: BuildOutcome::Running,
    };

    renderer.render(&state);
    renderer.finish();

    assert!(!renderer.drawn);
    assert!(renderer.last_status.is_none());
  }

  #[test]
  fn test_progress_bar() {
    assert_eq!(progress_bar(0, 10), "[----------]");
    assert_eq!(progress_bar(50, 10), "[#####-----]");
    assert_eq!(progress_bar(100, 10), "[##########]");
    assert_eq!(progress_bar(250, 10), "[##########]");
  }
}
