//! Run orchestration: check the test list, extract, launch, relay, report.
//!
//! A run has exactly two outcomes that are not errors. A missing test list
//! skips the run with a warning, and a detector that exits with a non-zero
//! status is reported as a warning. Detector findings never break the
//! build; only a missing detector or a launch or I/O failure does.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::artifact::{ArtifactSource, MaterialisedTool, TOOL_RESOURCE};
use crate::error::RunError;
use crate::invocation::{Invocation, ToolRuntime};
use crate::process;
use crate::reporter::RunReporter;

/// Immutable inputs for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    manifest: PathBuf,
}

impl RunConfig {
    /// Creates a configuration for the given test list.
    #[must_use]
    pub fn new(manifest: impl Into<PathBuf>) -> Self {
        Self {
            manifest: manifest.into(),
        }
    }

    /// Test list handed to the detector.
    #[must_use]
    pub fn manifest(&self) -> &Path {
        &self.manifest
    }
}

/// Termination status of a detector process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolExit {
    code: Option<i32>,
    lines: usize,
}

impl ToolExit {
    /// Records an exit code (`None` for signal termination) and the number
    /// of output lines relayed.
    #[must_use]
    pub const fn new(code: Option<i32>, lines: usize) -> Self {
        Self { code, lines }
    }

    /// Exit code, absent when the process was terminated by a signal.
    #[must_use]
    pub const fn code(&self) -> Option<i32> {
        self.code
    }

    /// Number of output lines relayed.
    #[must_use]
    pub const fn lines_relayed(&self) -> usize {
        self.lines
    }

    /// Whether the detector exited with status zero.
    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self.code, Some(0))
    }
}

impl fmt::Display for ToolExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {code}"),
            None => f.write_str("termination by signal"),
        }
    }
}

/// Result of a run that did not abort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The test list did not exist; nothing was extracted or launched.
    ManifestMissing {
        /// Path that was checked.
        manifest: PathBuf,
    },
    /// The detector ran to completion, successfully or not.
    Finished(ToolExit),
}

impl RunOutcome {
    /// Detector exit details, when the detector ran.
    #[must_use]
    pub const fn tool_exit(&self) -> Option<&ToolExit> {
        match self {
            Self::ManifestMissing { .. } => None,
            Self::Finished(exit) => Some(exit),
        }
    }
}

/// What a run would do, resolved without extracting or launching anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPlan {
    /// Absolute test list path.
    pub manifest: PathBuf,
    /// Whether the test list currently exists.
    pub manifest_present: bool,
    /// Whether the detector can be extracted.
    pub tool_available: bool,
    /// Command that would be launched, with a placeholder for the jar copy.
    pub invocation: Invocation,
}

/// Runs the detector against a test list.
///
/// # Example
///
/// ```no_run
/// use tsdetect_runner::{EmbeddedArtifact, RunConfig, Runner, StructuredRunReporter};
///
/// let runner = Runner::new(EmbeddedArtifact::new(), StructuredRunReporter::new());
/// let outcome = runner.run(&RunConfig::new("test-list.csv"))?;
/// # let _ = outcome;
/// # Ok::<(), tsdetect_runner::RunError>(())
/// ```
#[derive(Debug)]
pub struct Runner<A, R> {
    artifact: A,
    reporter: R,
    runtime: ToolRuntime,
    temp_dir: Option<PathBuf>,
}

impl<A, R> Runner<A, R> {
    /// Creates a runner that hosts the detector under `java -jar`.
    #[must_use]
    pub fn new(artifact: A, reporter: R) -> Self {
        Self {
            artifact,
            reporter,
            runtime: ToolRuntime::java(),
            temp_dir: None,
        }
    }

    /// Replaces the host runtime.
    #[must_use]
    pub fn with_runtime(mut self, runtime: ToolRuntime) -> Self {
        self.runtime = runtime;
        self
    }

    /// Extracts the detector into `dir` instead of the system temp directory.
    #[must_use]
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    /// Reporter receiving run events.
    #[must_use]
    pub const fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Host runtime for the detector.
    #[must_use]
    pub const fn runtime(&self) -> &ToolRuntime {
        &self.runtime
    }
}

impl<A, R> Runner<A, R>
where
    A: ArtifactSource,
    R: RunReporter,
{
    /// Runs the detector once.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::ToolMissing`] when the detector is not bundled and
    /// the other [`RunError`] variants for extraction, launch, and I/O
    /// failures. A missing test list and a non-zero detector exit are
    /// reported through [`RunOutcome`] instead.
    pub fn run(&self, config: &RunConfig) -> Result<RunOutcome, RunError> {
        let manifest = config.manifest();
        self.reporter.run_starting(manifest);

        if !manifest.exists() {
            self.reporter.manifest_missing(manifest);
            return Ok(RunOutcome::ManifestMissing {
                manifest: manifest.to_path_buf(),
            });
        }

        match self.launch(manifest) {
            Ok(exit) => Ok(RunOutcome::Finished(exit)),
            Err(error) => {
                self.reporter.run_failed(&error);
                Err(error)
            }
        }
    }

    /// Resolves what [`Runner::run`] would do without side effects.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::ResolveManifest`] when the test list path cannot
    /// be made absolute.
    pub fn plan(&self, config: &RunConfig) -> Result<RunPlan, RunError> {
        let manifest = absolute_manifest(config.manifest())?;
        let placeholder = PathBuf::from(format!("<{TOOL_RESOURCE}>"));
        Ok(RunPlan {
            manifest_present: manifest.exists(),
            tool_available: self.artifact.bytes().is_some(),
            invocation: Invocation::new(&self.runtime, &placeholder, &manifest),
            manifest,
        })
    }

    fn launch(&self, manifest: &Path) -> Result<ToolExit, RunError> {
        let manifest = absolute_manifest(manifest)?;
        let tool = MaterialisedTool::extract(&self.artifact, self.temp_dir.as_deref())?;
        self.reporter.tool_extracted(tool.path());

        let invocation = Invocation::new(&self.runtime, tool.path(), &manifest);
        self.reporter.tool_launching(&invocation);

        let exit = process::run_to_completion(&invocation, |line| {
            self.reporter.tool_output(line);
        })?;

        if let Err(error) = tool.release() {
            tracing::warn!(
                target: "tsdetect_runner::run",
                error = %error,
                "failed to remove extracted detector"
            );
        }

        if exit.success() {
            self.reporter.tool_succeeded(&exit);
        } else {
            self.reporter.tool_failed(&exit);
        }
        Ok(exit)
    }
}

fn absolute_manifest(manifest: &Path) -> Result<PathBuf, RunError> {
    std::path::absolute(manifest).map_err(|source| RunError::ResolveManifest {
        path: manifest.to_path_buf(),
        source: Arc::new(source),
    })
}
