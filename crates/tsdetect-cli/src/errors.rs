//! Error type collecting every failure the binary can report.

use std::io;
use std::sync::Arc;

use thiserror::Error;
use tsdetect_runner::{CleanupError, RunError};

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error("failed to initialise logging: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    Cleanup(#[from] CleanupError),
    #[error("test smell analysis failed: {0}")]
    Run(#[from] RunError),
    #[error("failed to write run plan: {0}")]
    WritePlan(io::Error),
}
