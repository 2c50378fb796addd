//! Built-in configuration defaults.

use camino::Utf8PathBuf;

use crate::logging::LogFormat;

/// File name of the test list expected under the project root.
pub const DEFAULT_MANIFEST_FILE: &str = "test-list.csv";

/// Project root used when none is configured.
pub const DEFAULT_PROJECT_ROOT: &str = ".";

/// Default log filter expression used by the binary.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default logging format for the binary.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

/// Default project root, relative to the working directory.
#[must_use]
pub fn default_project_root() -> Utf8PathBuf {
    Utf8PathBuf::from(DEFAULT_PROJECT_ROOT)
}

/// Computes the default manifest location for a project root.
#[must_use]
pub fn default_manifest_path(project_root: &camino::Utf8Path) -> Utf8PathBuf {
    project_root.join(DEFAULT_MANIFEST_FILE)
}
