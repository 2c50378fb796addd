//! Crate-level test support and BDD tests.

use std::cell::RefCell;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::RunError;
use crate::invocation::Invocation;
use crate::reporter::RunReporter;
use crate::runner::ToolExit;


/// Contents written to scratch test lists.
pub(crate) const TEST_LIST: &str = "App,/src/test/AppTest.java,/src/main/App.java\n";

/// One observed reporter callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RunEvent {
    Starting(PathBuf),
    ManifestMissing(PathBuf),
    Extracted(PathBuf),
    Launching(Vec<OsString>),
    Output(String),
    Succeeded(ToolExit),
    Failed(ToolExit),
    Aborted(String),
}

/// Reporter that records every callback in order.
#[derive(Debug, Default)]
pub(crate) struct RecordingReporter {
    events: RefCell<Vec<RunEvent>>,
}

impl RecordingReporter {
    pub(crate) fn events(&self) -> Vec<RunEvent> {
        self.events.borrow().clone()
    }

    pub(crate) fn output_lines(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                RunEvent::Output(line) => Some(line.clone()),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn extracted_paths(&self) -> Vec<PathBuf> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                RunEvent::Extracted(path) => Some(path.clone()),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn launches(&self) -> Vec<Vec<OsString>> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                RunEvent::Launching(args) => Some(args.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, event: RunEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl RunReporter for RecordingReporter {
    fn run_starting(&self, manifest: &Path) {
        self.record(RunEvent::Starting(manifest.to_path_buf()));
    }

    fn manifest_missing(&self, manifest: &Path) {
        self.record(RunEvent::ManifestMissing(manifest.to_path_buf()));
    }

    fn tool_extracted(&self, path: &Path) {
        self.record(RunEvent::Extracted(path.to_path_buf()));
    }

    fn tool_launching(&self, invocation: &Invocation) {
        self.record(RunEvent::Launching(invocation.args().to_vec()));
    }

    fn tool_output(&self, line: &str) {
        self.record(RunEvent::Output(line.to_owned()));
    }

    fn tool_succeeded(&self, exit: &ToolExit) {
        self.record(RunEvent::Succeeded(*exit));
    }

    fn tool_failed(&self, exit: &ToolExit) {
        self.record(RunEvent::Failed(*exit));
    }

    fn run_failed(&self, error: &RunError) {
        self.record(RunEvent::Aborted(error.to_string()));
    }
}

/// Writes a test list into `dir` and returns its path.
pub(crate) fn write_test_list(dir: &Path) -> PathBuf {
    let path = dir.join("test-list.csv");
    fs::write(&path, TEST_LIST).expect("write test list");
    path
}

/// Number of entries in `dir`.
pub(crate) fn entries(dir: &Path) -> usize {
    fs::read_dir(dir).expect("read dir").count()
}

/// Runner pieces that execute a shell script in place of the jar.
#[cfg(unix)]
pub(crate) mod shell {
    use std::path::Path;

    use crate::artifact::InMemoryArtifact;
    use crate::invocation::ToolRuntime;
    use crate::runner::Runner;

    use super::RecordingReporter;

    /// A runner whose detector is the given `sh` script.
    ///
    /// `sh <copy> <test list>` leaves the copy in `$0` and the test list in
    /// `$1`.
    pub(crate) fn script_runner(
        script: &str,
        temp_dir: &Path,
    ) -> Runner<InMemoryArtifact, RecordingReporter> {
        Runner::new(
            InMemoryArtifact::new("detector.sh", script.as_bytes().to_vec()),
            RecordingReporter::default(),
        )
        .with_runtime(ToolRuntime::new("sh"))
        .with_temp_dir(temp_dir)
    }
}
