//! Fatal errors raised while running the detector.
//!
//! A missing test list and a non-zero detector exit are not errors: both are
//! reported through [`RunOutcome`](crate::RunOutcome) and the run still
//! succeeds. Everything here aborts the run. I/O errors are wrapped in `Arc`
//! to satisfy the `result_large_err` Clippy lint.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// Errors that abort a detector run.
#[derive(Debug, Error)]
pub enum RunError {
    /// The detector was not bundled into this build.
    #[error("bundled detector '{resource}' was not found in the tool's resources")]
    ToolMissing {
        /// Name of the resource that was looked up.
        resource: String,
    },

    /// The detector could not be copied to a temporary file.
    #[error("failed to extract the detector into '{}': {source}", .path.display())]
    Extract {
        /// Temporary file, or the directory it was to be created in.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<io::Error>,
    },

    /// The test list path could not be made absolute.
    #[error("failed to resolve test list path '{}': {source}", .path.display())]
    ResolveManifest {
        /// Path as configured.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<io::Error>,
    },

    /// The detector process could not be started.
    #[error("failed to launch '{program}': {source}")]
    Launch {
        /// Runtime program that was spawned.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: Arc<io::Error>,
    },

    /// Reading the detector's combined output failed.
    #[error("failed to read detector output: {source}")]
    ReadOutput {
        /// Underlying I/O error.
        #[source]
        source: Arc<io::Error>,
    },

    /// Waiting for the detector to exit failed.
    #[error("failed to wait for the detector to exit: {source}")]
    Wait {
        /// Underlying I/O error.
        #[source]
        source: Arc<io::Error>,
    },
}

impl RunError {
    /// Returns true when the detector was never bundled.
    ///
    /// All other variants are launch or I/O failures.
    #[must_use]
    pub const fn is_tool_missing(&self) -> bool {
        matches!(self, Self::ToolMissing { .. })
    }
}
