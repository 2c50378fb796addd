//! Diagnostics emitted over the course of a run.

use std::path::Path;
use std::sync::Arc;

use crate::error::RunError;
use crate::invocation::Invocation;
use crate::runner::ToolExit;

/// Tag prepended to every relayed detector output line.
pub const OUTPUT_PREFIX: &str = "[tsDetect] ";

/// Tracing target for run lifecycle events.
const RUN_TARGET: &str = "tsdetect_runner::run";

/// Observer for run lifecycle events.
pub trait RunReporter {
    /// Invoked before the test list is checked.
    fn run_starting(&self, manifest: &Path);

    /// Invoked when the test list does not exist and the run is skipped.
    fn manifest_missing(&self, manifest: &Path);

    /// Invoked after the detector was copied to `path`.
    fn tool_extracted(&self, path: &Path);

    /// Invoked immediately before the detector process is spawned.
    fn tool_launching(&self, invocation: &Invocation);

    /// Invoked for each line of detector output, without a line terminator.
    fn tool_output(&self, line: &str);

    /// Invoked when the detector exits with status zero.
    fn tool_succeeded(&self, exit: &ToolExit);

    /// Invoked when the detector exits with a non-zero status or a signal.
    fn tool_failed(&self, exit: &ToolExit);

    /// Invoked when the run aborts with an error.
    fn run_failed(&self, error: &RunError);
}

impl<T> RunReporter for Arc<T>
where
    T: RunReporter + ?Sized,
{
    fn run_starting(&self, manifest: &Path) {
        (**self).run_starting(manifest);
    }

    fn manifest_missing(&self, manifest: &Path) {
        (**self).manifest_missing(manifest);
    }

    fn tool_extracted(&self, path: &Path) {
        (**self).tool_extracted(path);
    }

    fn tool_launching(&self, invocation: &Invocation) {
        (**self).tool_launching(invocation);
    }

    fn tool_output(&self, line: &str) {
        (**self).tool_output(line);
    }

    fn tool_succeeded(&self, exit: &ToolExit) {
        (**self).tool_succeeded(exit);
    }

    fn tool_failed(&self, exit: &ToolExit) {
        (**self).tool_failed(exit);
    }

    fn run_failed(&self, error: &RunError) {
        (**self).run_failed(error);
    }
}

/// Default reporter that records run events using `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredRunReporter;

impl StructuredRunReporter {
    /// Builds a new reporter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl RunReporter for StructuredRunReporter {
    fn run_starting(&self, manifest: &Path) {
        tracing::info!(
            target: RUN_TARGET,
            event = "run_starting",
            manifest = %manifest.display(),
            "starting test smell analysis"
        );
    }

    fn manifest_missing(&self, manifest: &Path) {
        tracing::warn!(
            target: RUN_TARGET,
            event = "manifest_missing",
            "test list not found at {}; create it or set --manifest-path to an existing file",
            manifest.display()
        );
    }

    fn tool_extracted(&self, path: &Path) {
        tracing::debug!(
            target: RUN_TARGET,
            event = "tool_extracted",
            path = %path.display(),
            "detector extracted"
        );
    }

    fn tool_launching(&self, invocation: &Invocation) {
        tracing::debug!(
            target: RUN_TARGET,
            event = "tool_launching",
            command = %invocation,
            "launching detector"
        );
    }

    fn tool_output(&self, line: &str) {
        tracing::info!(target: RUN_TARGET, "{OUTPUT_PREFIX}{line}");
    }

    fn tool_succeeded(&self, exit: &ToolExit) {
        tracing::info!(
            target: RUN_TARGET,
            event = "tool_succeeded",
            lines = exit.lines_relayed(),
            "test smell analysis finished"
        );
    }

    fn tool_failed(&self, exit: &ToolExit) {
        tracing::warn!(
            target: RUN_TARGET,
            event = "tool_failed",
            lines = exit.lines_relayed(),
            "tsDetect finished with {exit}"
        );
    }

    fn run_failed(&self, error: &RunError) {
        tracing::error!(
            target: RUN_TARGET,
            event = "run_failed",
            error = %error,
            "test smell analysis aborted"
        );
    }
}
