//! Shared configuration for the tsdetect runner.
//!
//! Configuration is layered by `ortho_config`: built-in defaults, then an
//! optional configuration file (`--config-path`), then `TSDETECT_*`
//! environment variables, then command-line flags. Every field is optional
//! at the storage level; the accessor methods on [`Config`] apply the
//! defaults from [`defaults`] so callers always see a resolved value.

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

/// Built-in values used when no layer supplies a setting.
pub mod defaults;
mod logging;

pub use defaults::{
    DEFAULT_LOG_FILTER, DEFAULT_MANIFEST_FILE, DEFAULT_PROJECT_ROOT, default_log_format,
    default_manifest_path, default_project_root,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Resolved configuration for a single tsdetect invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "TSDETECT")]
pub struct Config {
    /// Test list handed to the detector. Relative paths resolve against the
    /// project root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest_path: Option<Utf8PathBuf>,
    /// Base directory of the project under analysis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_root: Option<Utf8PathBuf>,
    /// `tracing` filter expression applied to log output.
    #[ortho_config(default = String::from(DEFAULT_LOG_FILTER))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
    /// Output format for log lines.
    #[ortho_config(default = default_log_format())]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_format: Option<LogFormat>,
}

impl Config {
    /// Project base directory, defaulting to the working directory.
    #[must_use]
    pub fn project_root(&self) -> Utf8PathBuf {
        self.project_root
            .clone()
            .unwrap_or_else(default_project_root)
    }

    /// Location of the test list handed to the detector.
    ///
    /// Falls back to `<project_root>/test-list.csv`. Configured relative
    /// paths are joined onto the project root; absolute paths are kept.
    #[must_use]
    pub fn manifest_path(&self) -> Utf8PathBuf {
        let root = self.project_root();
        match self.manifest_path.as_deref() {
            Some(path) => resolve_against(&root, path),
            None => default_manifest_path(&root),
        }
    }

    /// Filter expression for the log subscriber.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }

    /// Output format for the log subscriber.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format.unwrap_or_else(default_log_format)
    }
}

fn resolve_against(root: &Utf8Path, path: &Utf8Path) -> Utf8PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
