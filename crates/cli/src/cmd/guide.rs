use owo_colors::{OwoColorize, Stream};

const GUIDE_STEPS: [&str; 4] = [
  "Pick your Python script:         nuitkaconv build app.py",
  "Choose an output directory:      --output-dir dist",
  "Select build options:            --onefile --include-package requests ...",
  "Check the command before a run:  nuitkaconv args app.py --output-dir dist",
];

pub fn cmd_guide() {
  println!(
    "{} v{}",
    "nuitkaconv".if_supports_color(Stream::Stdout, |s| s.bold()),
    env!("CARGO_PKG_VERSION")
  );
  println!();
  println!("Quick Guide:");
  for (idx, step) in GUIDE_STEPS.iter().enumerate() {
    println!("  {}. {}", idx + 1, step);
  }
  println!();
  println!("Note: Standalone mode is recommended for most cases and is on by default (--no-standalone turns it off)");
}
