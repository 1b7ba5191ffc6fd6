//! Error types for the CLI runtime.

use std::io;
use std::sync::Arc;

use hostap_config::ConfigError;
use hostap_supervisor::SupervisorError;
use thiserror::Error;

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error("invalid access point configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    #[error("failed to initialise logging: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    Supervisor(#[from] SupervisorError),
    #[error("failed to write command output: {0}")]
    WriteOutput(#[source] io::Error),
}

impl AppError {
    /// Last stderr fragment captured from a failed daemon launch.
    pub(crate) fn launch_diagnostics(&self) -> Option<&str> {
        match self {
            Self::Supervisor(SupervisorError::StartFailed { output }) => output.stderr.as_deref(),
            _ => None,
        }
    }
}
