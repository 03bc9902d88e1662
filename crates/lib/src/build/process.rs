//! External compiler process supervision.
//!
//! The process is opaque: its output is forwarded to the log line by line and
//! only the exit status decides the outcome. The last few stderr lines are
//! kept so a failure carries whatever the compiler printed before it died.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::consts::{OUTPUT_DRAIN_GRACE, STDERR_TAIL_LINES};

use super::invocation::Invocation;
use super::types::RunError;

/// The last `keep` lines read from a stream, shared with its forwarder.
#[derive(Debug, Clone)]
struct OutputTail {
  lines: Arc<Mutex<VecDeque<String>>>,
  keep: usize,
}

impl OutputTail {
  fn new(keep: usize) -> Self {
    Self {
      lines: Arc::new(Mutex::new(VecDeque::with_capacity(keep))),
      keep,
    }
  }

  fn push(&self, line: String) {
    if self.keep == 0 {
      return;
    }
    let mut lines = self.lines.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if lines.len() == self.keep {
      lines.pop_front();
    }
    lines.push_back(line);
  }

  fn joined(&self) -> String {
    let lines = self.lines.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    lines.iter().map(String::as_str).collect::<Vec<_>>().join("\n")
  }
}

/// Run the compiler to completion.
///
/// Completion is the compiler's own exit. Output still arriving afterwards
/// gets [`OUTPUT_DRAIN_GRACE`] to drain before forwarding is abandoned.
pub(crate) async fn run_compiler(invocation: &Invocation, args: &[String]) -> Result<(), RunError> {
  let program = invocation.program().to_string();

  let mut child = invocation
    .command(args)
    .spawn()
    .map_err(|source| RunError::Launch {
      program: program.clone(),
      source,
    })?;

  info!(program = %program, pid = ?child.id(), "compiler started");

  let stderr_tail = OutputTail::new(STDERR_TAIL_LINES);
  let stdout = child
    .stdout
    .take()
    .map(|out| tokio::spawn(forward_lines(out, "stdout", OutputTail::new(0))));
  let stderr = child
    .stderr
    .take()
    .map(|err| tokio::spawn(forward_lines(err, "stderr", stderr_tail.clone())));

  let status = child.wait().await.map_err(|source| RunError::Wait {
    program: program.clone(),
    source,
  })?;

  info!(program = %program, status = %status, "compiler exited");

  for (stream, task) in [("stdout", stdout), ("stderr", stderr)] {
    if let Some(task) = task {
      finish_forwarding(task, stream).await;
    }
  }

  if status.success() {
    return Ok(());
  }

  Err(RunError::Exit {
    command: invocation.command_line(args).join(" "),
    status,
    stderr: stderr_tail.joined(),
  })
}

/// Wait briefly for a forwarder to reach end of file, then abandon it.
async fn finish_forwarding(mut task: JoinHandle<()>, stream: &'static str) {
  match tokio::time::timeout(OUTPUT_DRAIN_GRACE, &mut task).await {
    Ok(Ok(())) => {}
    Ok(Err(err)) => warn!(stream, error = %err, "compiler output forwarding stopped unexpectedly"),
    Err(_) => {
      debug!(stream, "output pipe still held open after exit, forwarding abandoned");
      task.abort();
    }
  }
}

/// Read `reader` to the end, logging each line and recording it in `tail`.
///
/// Invalid UTF-8 is replaced rather than treated as an error so the pipe is
/// always drained.
async fn forward_lines<R>(reader: R, stream: &'static str, tail: OutputTail)
where
  R: AsyncRead + Unpin,
{
  let mut reader = BufReader::new(reader);
  let mut buf = Vec::new();

  loop {
    buf.clear();
    match reader.read_until(b'\n', &mut buf).await {
      Ok(0) => break,
      Ok(_) => {
        let line = String::from_utf8_lossy(&buf).trim_end().to_string();
        debug!(stream, line = %line, "compiler output");
        tail.push(line);
      }
      Err(err) => {
        warn!(stream, error = %err, "failed to read compiler output");
        break;
      }
    }
  }
}
