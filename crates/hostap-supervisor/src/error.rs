//! Error surface of the supervisor.

use std::ffi::OsString;
use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

use crate::launcher::LaunchOutput;
use crate::service::ServiceError;

/// Errors raised by [`ProcessSupervisor`](crate::ProcessSupervisor) operations.
#[derive(Debug, Error)]
pub enum SupervisorError {
    /// The daemon executable was not found when the supervisor was built.
    #[error("hostapd binary not found in any of: {}", .search_path.to_string_lossy())]
    BinaryNotFound {
        /// Search path that was probed.
        search_path: OsString,
    },
    /// The launcher exited with a non-zero or missing exit code.
    #[error("hostapd failed to start (exit code {})", describe_code(.output.code))]
    StartFailed {
        /// Exit code and last output fragments captured from the launcher.
        output: LaunchOutput,
    },
    /// The launcher process could not be spawned or awaited.
    #[error("failed to launch '{program}': {source}")]
    Launch {
        /// Program that failed to launch.
        program: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// Writing the rendered configuration failed.
    #[error("failed to write configuration '{path}': {source}")]
    WriteConfig {
        /// Configuration file path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// Reading the persisted configuration failed.
    #[error("failed to read configuration '{path}': {source}")]
    ReadConfig {
        /// Configuration file path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// Removing the configuration file failed.
    #[error("failed to remove configuration '{path}': {source}")]
    RemoveConfig {
        /// Configuration file path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// Reading the process-id file failed.
    #[error("failed to read pid file '{path}': {source}")]
    ReadPid {
        /// Process-id file path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// The process-id file did not contain an integer.
    #[error("failed to parse pid file '{path}': {source}")]
    ParsePid {
        /// Process-id file path.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: ParseIntError,
    },
    /// The service manager rejected the restart.
    #[error(transparent)]
    Service(#[from] ServiceError),
}

fn describe_code(code: Option<i32>) -> String {
    code.map_or_else(|| String::from("none"), |code| code.to_string())
}
