use std::time::Duration;

/// Host runtime used to launch the compiler module when nothing overrides it.
pub const DEFAULT_HOST_RUNTIME: &str = "python";

/// Module passed to the host runtime's `-m` switch.
pub const DEFAULT_COMPILER_MODULE: &str = "nuitka";

pub const HOST_RUNTIME_ENV: &str = "NUITKACONV_PYTHON";
pub const COMPILER_MODULE_ENV: &str = "NUITKACONV_COMPILER_MODULE";

/// Arguments emitted ahead of every flag-derived argument.
pub const BASELINE_ARGS: [&str; 2] = ["--assume-yes-for-downloads", "--enable-plugin=tk-inter"];

/// Highest value the progress indicator reaches.
pub const PROGRESS_MAX: u8 = 100;

/// Delay between two simulated progress steps.
pub const DEFAULT_PROGRESS_INTERVAL: Duration = Duration::from_millis(100);

/// Number of trailing stderr lines kept for the failure detail.
pub const STDERR_TAIL_LINES: usize = 20;

/// How long output forwarding may outlive the compiler process.
///
/// Background children can keep the pipes open long after the compiler
/// itself has exited.
pub const OUTPUT_DRAIN_GRACE: Duration = Duration::from_millis(250);

pub const STATUS_CONVERTING: &str = "Converting...";
pub const STATUS_SUCCEEDED: &str = "Conversion completed successfully!";
pub const STATUS_FAILED: &str = "Conversion failed.";
