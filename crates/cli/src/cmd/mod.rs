mod args;
mod build;
mod guide;

pub use args::cmd_args;
pub use build::cmd_build;
pub use guide::cmd_guide;
