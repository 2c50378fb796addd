//! Sources for the detector jar and its per-run temporary copy.
//!
//! The jar normally ships inside the binary ([`EmbeddedArtifact`]). Each run
//! copies it verbatim into a freshly named temporary file owned by a
//! [`MaterialisedTool`], which deletes the copy when released or dropped.

use std::env;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use tempfile::{NamedTempFile, TempPath};

use crate::cleanup::{CleanupRegistration, CleanupRegistry};
use crate::error::RunError;

include!(concat!(env!("OUT_DIR"), "/embedded_tool.rs"));

/// Resource name of the bundled detector.
pub const TOOL_RESOURCE: &str = "TestSmellDetector.jar";

const TEMP_PREFIX: &str = "TestSmellDetector_tool";
const TEMP_SUFFIX: &str = ".jar";

/// Where the detector bytes come from.
pub trait ArtifactSource {
    /// Name reported when the resource cannot be found.
    fn resource_name(&self) -> &str;

    /// Detector contents, or `None` when the resource is absent.
    fn bytes(&self) -> Option<&[u8]>;
}

/// Detector embedded into the binary at build time.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbeddedArtifact;

impl EmbeddedArtifact {
    /// Creates a handle to the embedded detector.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Whether this build carries the detector.
    #[must_use]
    pub fn is_bundled(&self) -> bool {
        EMBEDDED_TOOL.is_some()
    }
}

impl ArtifactSource for EmbeddedArtifact {
    fn resource_name(&self) -> &str {
        TOOL_RESOURCE
    }

    fn bytes(&self) -> Option<&[u8]> {
        EMBEDDED_TOOL
    }
}

/// Detector held in memory, or a named resource known to be absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InMemoryArtifact {
    name: String,
    bytes: Option<Vec<u8>>,
}

impl InMemoryArtifact {
    /// Wraps the given detector contents.
    #[must_use]
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: Some(bytes.into()),
        }
    }

    /// A resource that cannot be located.
    #[must_use]
    pub fn missing(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bytes: None,
        }
    }
}

impl ArtifactSource for InMemoryArtifact {
    fn resource_name(&self) -> &str {
        &self.name
    }

    fn bytes(&self) -> Option<&[u8]> {
        self.bytes.as_deref()
    }
}

/// Temporary on-disk copy of the detector, owned by one run.
#[derive(Debug)]
pub struct MaterialisedTool {
    path: TempPath,
    registration: CleanupRegistration<'static>,
}

impl MaterialisedTool {
    /// Copies the detector into a new temporary file.
    ///
    /// The file is created in `dir`, or the system temporary directory when
    /// `dir` is `None`, and is registered for removal on termination signals.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::ToolMissing`] when the source has no bytes and
    /// [`RunError::Extract`] when the temporary file cannot be written.
    pub fn extract<A>(artifact: &A, dir: Option<&Path>) -> Result<Self, RunError>
    where
        A: ArtifactSource + ?Sized,
    {
        let bytes = artifact.bytes().ok_or_else(|| RunError::ToolMissing {
            resource: artifact.resource_name().to_owned(),
        })?;

        let mut file = create_temp_file(dir).map_err(|source| RunError::Extract {
            path: dir.map_or_else(env::temp_dir, Path::to_path_buf),
            source: Arc::new(source),
        })?;
        let registration = CleanupRegistry::global().register(file.path());

        write_all(file.as_file_mut(), bytes).map_err(|source| RunError::Extract {
            path: file.path().to_path_buf(),
            source: Arc::new(source),
        })?;

        Ok(Self {
            path: file.into_temp_path(),
            registration,
        })
    }

    /// Location of the temporary copy.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Deletes the temporary copy, reporting any removal failure.
    ///
    /// # Errors
    ///
    /// Returns the I/O error raised while deleting the file.
    pub fn release(self) -> io::Result<()> {
        let Self { path, registration } = self;
        let removed = path.close();
        drop(registration);
        removed
    }
}

fn create_temp_file(dir: Option<&Path>) -> io::Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(TEMP_PREFIX).suffix(TEMP_SUFFIX);
    match dir {
        Some(dir) => builder.tempfile_in(dir),
        None => builder.tempfile(),
    }
}

fn write_all(file: &mut File, bytes: &[u8]) -> io::Result<()> {
    file.write_all(bytes)?;
    file.flush()
}
