//! Runs the bundled tsDetect test smell detector against a test list.
//!
//! A [`Runner`] checks that the configured test list exists, copies the
//! detector jar from an [`ArtifactSource`] to a fresh temporary file, runs
//! `java -jar <copy> <test list>`, relays every line the detector writes to
//! stdout or stderr through a [`RunReporter`], and reports the exit status.
//!
//! Only a missing detector or a launch or I/O failure is an error. A missing
//! test list skips the run and a non-zero detector exit is reported as a
//! warning, so the detector's findings never fail the surrounding build.
//!
//! # Example
//!
//! ```rust,no_run
//! use tsdetect_runner::{EmbeddedArtifact, RunConfig, Runner, StructuredRunReporter};
//!
//! # fn main() -> Result<(), tsdetect_runner::RunError> {
//! let runner = Runner::new(EmbeddedArtifact::new(), StructuredRunReporter::new());
//! let outcome = runner.run(&RunConfig::new("test-list.csv"))?;
//! if let Some(exit) = outcome.tool_exit() {
//!     eprintln!("detector finished with {exit}");
//! }
//! # Ok(()) }
//! ```

pub mod artifact;
pub mod cleanup;
pub mod error;
pub mod invocation;
mod process;
pub mod reporter;
pub mod runner;

#[cfg(test)]
mod tests;

pub use self::artifact::{ArtifactSource, EmbeddedArtifact, InMemoryArtifact, MaterialisedTool};
pub use self::cleanup::{CleanupError, CleanupRegistry, install_signal_cleanup};
pub use self::error::RunError;
pub use self::invocation::{Invocation, ToolRuntime};
pub use self::process::relay_lines;
pub use self::reporter::{OUTPUT_PREFIX, RunReporter, StructuredRunReporter};
pub use self::runner::{RunConfig, RunOutcome, RunPlan, Runner, ToolExit};
