//! Delegates restarts to the system service manager.

use std::io;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::info;

use crate::SERVICE_TARGET;

/// Program invoked by [`Systemctl`].
pub const SYSTEMCTL: &str = "systemctl";

/// Abstraction over "restart this named service".
pub trait ServiceManager {
    /// Restarts `service` and waits for the manager to finish.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] when the manager cannot be invoked or reports
    /// a failure.
    fn restart(&self, service: &str) -> Result<(), ServiceError>;
}

/// Errors surfaced by a [`ServiceManager`].
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The service manager could not be spawned.
    #[error("failed to run '{program}': {source}")]
    Spawn {
        /// Program that failed to spawn.
        program: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// The service manager exited unsuccessfully.
    #[error("restart of '{service}' failed (exit code {code:?}): {stderr}")]
    Failed {
        /// Service that failed to restart.
        service: String,
        /// Exit code reported by the manager.
        code: Option<i32>,
        /// Trimmed stderr output.
        stderr: String,
    },
}

/// Restarts services through `systemctl restart`.
#[derive(Debug, Clone)]
pub struct Systemctl {
    program: PathBuf,
}

impl Systemctl {
    /// Uses `systemctl` from the search path.
    #[must_use]
    pub fn new() -> Self {
        Self::with_program(SYSTEMCTL)
    }

    /// Uses an explicit `systemctl`-compatible program.
    #[must_use]
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for Systemctl {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceManager for Systemctl {
    fn restart(&self, service: &str) -> Result<(), ServiceError> {
        info!(target: SERVICE_TARGET, service, "restarting service");
        let output = Command::new(&self.program)
            .arg("restart")
            .arg(service)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ServiceError::Spawn {
                program: self.program.clone(),
                source,
            })?;
        if output.status.success() {
            return Ok(());
        }
        Err(ServiceError::Failed {
            service: service.to_owned(),
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
        })
    }
}
