//! Command-line flags that are not part of the layered configuration.

use clap::Parser;

/// Runs the bundled tsDetect test smell detector against a test list.
#[derive(Parser, Debug)]
#[command(name = "tsdetect", version)]
pub(crate) struct Cli {
    /// Prints the resolved test list, detector availability, and command
    /// line, then exits without extracting or launching the detector.
    #[arg(long)]
    pub(crate) dry_run: bool,
}
