//! Entry point for the `tsdetect` binary.
//!
//! Delegates to [`tsdetect_cli::run`], which loads configuration, installs
//! logging, and runs the bundled detector against the configured test list.

use std::io::{self, Stderr, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    // Left unlocked: the log subscriber and the cleanup thread share stderr.
    let mut stderr: Stderr = io::stderr();
    tsdetect_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
