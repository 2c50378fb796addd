//! Removal of extracted detectors when the host process is terminated.
//!
//! Normal completion, early errors, and panics release the temporary copy
//! through `Drop`. A termination signal bypasses destructors, so every live
//! copy is also recorded in the process-wide [`CleanupRegistry::global`]
//! registry. Once [`install_signal_cleanup`] has run, SIGINT, SIGTERM, SIGHUP,
//! and SIGQUIT delete whatever is still registered before the default
//! disposition of the signal is restored.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use once_cell::sync::{Lazy, OnceCell};
use thiserror::Error;

/// Tracing target for cleanup operations.
const CLEANUP_TARGET: &str = "tsdetect_runner::cleanup";

static GLOBAL: Lazy<CleanupRegistry> = Lazy::new(CleanupRegistry::new);
static LISTENER: OnceCell<()> = OnceCell::new();

/// Errors reported while installing the signal listener.
#[derive(Debug, Error)]
pub enum CleanupError {
    /// Installing signal handlers or the listener thread failed.
    #[error("failed to install cleanup signal handlers: {source}")]
    Install {
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Set of temporary files to delete if the process is terminated.
#[derive(Debug, Default)]
pub struct CleanupRegistry {
    pending: Mutex<Vec<PathBuf>>,
}

impl CleanupRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry consulted by the signal listener.
    #[must_use]
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Records `path` for removal until the returned registration is dropped.
    pub fn register(&self, path: &Path) -> CleanupRegistration<'_> {
        self.lock().push(path.to_path_buf());
        CleanupRegistration {
            registry: self,
            path: path.to_path_buf(),
        }
    }

    /// Paths currently registered.
    #[must_use]
    pub fn pending(&self) -> Vec<PathBuf> {
        self.lock().clone()
    }

    /// Deletes every registered path and clears the registry.
    ///
    /// Paths that have already disappeared are skipped. Returns the number of
    /// files removed.
    pub fn remove_pending(&self) -> usize {
        let paths: Vec<PathBuf> = self.lock().drain(..).collect();
        paths.iter().filter(|path| remove_file(path)).count()
    }

    fn unregister(&self, path: &Path) {
        let mut pending = self.lock();
        if let Some(position) = pending.iter().position(|entry| entry == path) {
            pending.swap_remove(position);
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<PathBuf>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Keeps a path registered for signal-time removal until dropped.
#[derive(Debug)]
#[must_use = "dropping the registration immediately unregisters the path"]
pub struct CleanupRegistration<'a> {
    registry: &'a CleanupRegistry,
    path: PathBuf,
}

impl CleanupRegistration<'_> {
    /// Path covered by this registration.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for CleanupRegistration<'_> {
    fn drop(&mut self) {
        self.registry.unregister(&self.path);
    }
}

/// Installs the termination-signal listener once per process.
///
/// Repeated calls are no-ops. On platforms without POSIX signals the
/// listener is not installed and the call always succeeds.
pub fn install_signal_cleanup() -> Result<(), CleanupError> {
    LISTENER.get_or_try_init(spawn_listener).map(|_| ())
}

fn remove_file(path: &Path) -> bool {
    match fs::remove_file(path) {
        Ok(()) => true,
        Err(error) if error.kind() == io::ErrorKind::NotFound => false,
        Err(error) => {
            tracing::warn!(
                target: CLEANUP_TARGET,
                path = %path.display(),
                error = %error,
                "failed to remove extracted detector"
            );
            false
        }
    }
}

#[cfg(unix)]
fn spawn_listener() -> Result<(), CleanupError> {
    use signal_hook::consts::signal::{SIGHUP, SIGINT, SIGQUIT, SIGTERM};
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new([SIGTERM, SIGINT, SIGQUIT, SIGHUP])
        .map_err(|source| CleanupError::Install { source })?;

    std::thread::Builder::new()
        .name(String::from("tsdetect-cleanup"))
        .spawn(move || {
            if let Some(signal) = signals.forever().next() {
                let removed = CleanupRegistry::global().remove_pending();
                tracing::warn!(
                    target: CLEANUP_TARGET,
                    signal,
                    removed,
                    "termination signal received"
                );
                if let Err(error) = signal_hook::low_level::emulate_default_handler(signal) {
                    tracing::error!(
                        target: CLEANUP_TARGET,
                        signal,
                        error = %error,
                        "failed to restore default signal handling"
                    );
                    std::process::exit(1);
                }
            }
        })
        .map_err(|source| CleanupError::Install { source })?;

    Ok(())
}

#[cfg(not(unix))]
fn spawn_listener() -> Result<(), CleanupError> {
    Ok(())
}
