//! Lifecycle supervision for the `hostapd` access point daemon.
//!
//! [`ProcessSupervisor`] writes the configuration rendered by
//! [`hostap_config`], launches `hostapd` in background mode and records its
//! process id. It also stops the daemon and restarts the system service when
//! the configuration changes.
//!
//! Every side effect goes through an injectable collaborator so tests can run
//! without root privileges or a wireless interface:
//!
//! - [`ExecutableLocator`] resolves the `hostapd` binary once at construction.
//! - [`ProcessLauncher`] runs the daemon launcher and the signal utility.
//! - [`ServiceManager`] restarts the named service unit.

mod error;
mod files;
mod launcher;
mod locator;
mod pid;
mod service;
mod supervisor;

pub use error::SupervisorError;
pub use launcher::{LaunchOutput, ProcessLauncher, SystemLauncher};
pub use locator::{ExecutableLocator, FixedLocator, PRIVILEGED_BIN_DIR, SearchPathLocator};
pub use service::{SYSTEMCTL, ServiceError, ServiceManager, Systemctl};
pub use supervisor::{ProcessSupervisor, RestartOutcome};

/// Name of the daemon executable probed on the search path.
pub const DAEMON_BINARY: &str = "hostapd";

/// Utility used to deliver the default termination signal.
pub const SIGNAL_PROGRAM: &str = "kill";

pub(crate) const PROCESS_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::process");
pub(crate) const SERVICE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::service");

#[cfg(test)]
mod tests;
