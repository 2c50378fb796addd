//! Command shape used to launch the detector.
//!
//! The detector is a jar, so it always runs under `java -jar`. The two paths
//! that vary between runs, the extracted jar and the test list, are appended
//! last and in that order.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::Path;
use std::process::Command;

/// Host runtime program for the bundled jar.
pub const JAVA_PROGRAM: &str = "java";

/// Program and leading arguments that host the extracted detector.
///
/// # Example
///
/// ```
/// use tsdetect_runner::ToolRuntime;
///
/// let runtime = ToolRuntime::default();
/// assert_eq!(runtime.program(), "java");
/// assert_eq!(runtime.leading_args(), ["-jar"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolRuntime {
    program: OsString,
    leading_args: Vec<OsString>,
}

impl ToolRuntime {
    /// Creates a runtime that invokes `program` with no leading arguments.
    #[must_use]
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
        }
    }

    /// The JVM launcher used for the bundled jar.
    #[must_use]
    pub fn java() -> Self {
        Self::new(JAVA_PROGRAM).arg("-jar")
    }

    /// Appends an argument placed before the detector path.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.leading_args.push(arg.into());
        self
    }

    /// Runtime program.
    #[must_use]
    pub fn program(&self) -> &OsStr {
        &self.program
    }

    /// Arguments placed before the detector path.
    #[must_use]
    pub fn leading_args(&self) -> &[OsString] {
        &self.leading_args
    }
}

impl Default for ToolRuntime {
    fn default() -> Self {
        Self::java()
    }
}

/// Fully resolved detector command line.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use tsdetect_runner::{Invocation, ToolRuntime};
///
/// let invocation = Invocation::new(
///     &ToolRuntime::java(),
///     Path::new("/tmp/TestSmellDetector_tool1.jar"),
///     Path::new("/work/test-list.csv"),
/// );
/// assert_eq!(
///     invocation.to_string(),
///     "java -jar /tmp/TestSmellDetector_tool1.jar /work/test-list.csv"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: OsString,
    args: Vec<OsString>,
}

impl Invocation {
    /// Builds `<runtime> <leading args> <tool> <manifest>`.
    #[must_use]
    pub fn new(runtime: &ToolRuntime, tool: &Path, manifest: &Path) -> Self {
        let mut args = runtime.leading_args().to_vec();
        args.push(tool.as_os_str().to_owned());
        args.push(manifest.as_os_str().to_owned());
        Self {
            program: runtime.program().to_owned(),
            args,
        }
    }

    /// Program to spawn.
    #[must_use]
    pub fn program(&self) -> &OsStr {
        &self.program
    }

    /// Arguments in the order they are passed.
    #[must_use]
    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// A [`Command`] for this invocation with default stdio.
    #[must_use]
    pub fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program.to_string_lossy())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
