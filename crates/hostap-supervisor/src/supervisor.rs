//! Lifecycle operations for a single `hostapd` instance.
//!
//! The supervisor keeps one piece of state beyond its configuration: the
//! process id captured after a successful [`ProcessSupervisor::start`].
//! Everything else lives on disk: the rendered configuration file, which
//! [`ProcessSupervisor::restart`] diffs against the desired text, and the
//! process-id file written by the daemon itself, which lets any instance
//! stop a daemon it did not launch.
//!
//! Every operation blocks until the child process it spawns has exited.
//! Callers wanting a deadline must impose it from outside.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use hostap_config::{ApConfig, DEFAULT_SERVICE_NAME};
use tracing::{debug, info, warn};

use crate::error::SupervisorError;
use crate::files::{atomic_write, read_optional, remove_if_exists};
use crate::launcher::{LaunchOutput, ProcessLauncher, SystemLauncher};
use crate::locator::{ExecutableLocator, SearchPathLocator};
use crate::pid::read_pid;
use crate::service::{ServiceManager, Systemctl};
use crate::{DAEMON_BINARY, PROCESS_TARGET, SIGNAL_PROGRAM};

/// Result of a [`ProcessSupervisor::restart`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartOutcome {
    /// The configuration was rewritten and the service restarted.
    Restarted,
    /// The persisted configuration already matched; nothing was done.
    Unchanged,
}

/// Drives the `hostapd` lifecycle for one access point configuration.
///
/// `start` is not guarded against double invocation: calling it twice spawns
/// the daemon twice. `stop` never fails and does not confirm termination.
#[derive(Debug)]
pub struct ProcessSupervisor<P, S> {
    config: ApConfig,
    binary: Option<PathBuf>,
    search_path: OsString,
    launcher: P,
    services: S,
    service_name: String,
    pid: Option<u32>,
}

impl ProcessSupervisor<SystemLauncher, Systemctl> {
    /// Builds a supervisor using the process `PATH`, real process spawning
    /// and `systemctl`.
    #[must_use]
    pub fn system(config: ApConfig) -> Self {
        Self::new(
            config,
            &SearchPathLocator::from_env(),
            SystemLauncher,
            Systemctl::new(),
        )
    }
}

impl<P, S> ProcessSupervisor<P, S>
where
    P: ProcessLauncher,
    S: ServiceManager,
{
    /// Builds a supervisor with injected collaborators.
    ///
    /// The daemon executable is resolved once, here; a missing binary only
    /// surfaces when [`start`](Self::start) is called.
    #[must_use]
    pub fn new(
        config: ApConfig,
        locator: &dyn ExecutableLocator,
        launcher: P,
        services: S,
    ) -> Self {
        let binary = locator.locate(DAEMON_BINARY);
        let search_path = locator.search_path();
        debug!(
            target: PROCESS_TARGET,
            binary = ?binary,
            "resolved daemon executable"
        );
        Self {
            config,
            binary,
            search_path,
            launcher,
            services,
            service_name: DEFAULT_SERVICE_NAME.to_owned(),
            pid: None,
        }
    }

    /// Overrides the unit restarted by [`restart`](Self::restart).
    #[must_use]
    pub fn with_service_name(mut self, service_name: impl Into<String>) -> Self {
        self.service_name = service_name.into();
        self
    }

    /// Access point configuration.
    #[must_use]
    pub const fn config(&self) -> &ApConfig {
        &self.config
    }

    /// Unit restarted by [`restart`](Self::restart).
    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Resolved daemon executable, if any.
    #[must_use]
    pub fn binary(&self) -> Option<&Path> {
        self.binary.as_deref()
    }

    /// Process id captured by the last successful start.
    #[must_use]
    pub const fn pid(&self) -> Option<u32> {
        self.pid
    }

    /// Writes the configuration and launches the daemon in background mode.
    ///
    /// Returns once the launcher exits. If the process-id file holds an id by
    /// then, the id is cached for [`stop`](Self::stop). The file is read even
    /// when the launch fails, so a stale file left by an earlier daemon is
    /// cached as well.
    ///
    /// # Errors
    ///
    /// - [`SupervisorError::BinaryNotFound`] when no executable was located;
    ///   nothing is written or spawned.
    /// - [`SupervisorError::WriteConfig`] when the configuration cannot be
    ///   written.
    /// - [`SupervisorError::Launch`] when the launcher cannot be spawned.
    /// - [`SupervisorError::StartFailed`] when the launcher exits non-zero.
    ///   Any id found in the process-id file is still cached.
    pub fn start(&mut self) -> Result<LaunchOutput, SupervisorError> {
        let Some(binary) = self.binary.clone() else {
            return Err(SupervisorError::BinaryNotFound {
                search_path: self.search_path.clone(),
            });
        };
        self.write_config()?;

        let args = [
            OsString::from("-P"),
            self.config.pid_file().as_os_str().to_owned(),
            OsString::from("-B"),
            self.config.config_file().as_os_str().to_owned(),
        ];
        info!(
            target: PROCESS_TARGET,
            binary = %binary.display(),
            config = %self.config.config_file().display(),
            "launching hostapd"
        );
        let output = self
            .launcher
            .launch(&binary, &args)
            .map_err(|source| SupervisorError::Launch {
                program: binary.clone(),
                source,
            })?;

        if let Some(pid) = self.capture_pid() {
            self.pid = Some(pid);
        }
        if !output.success() {
            warn!(
                target: PROCESS_TARGET,
                code = ?output.code,
                stderr = output.stderr.as_deref().unwrap_or_default(),
                "hostapd failed to start"
            );
            return Err(SupervisorError::StartFailed { output });
        }
        info!(target: PROCESS_TARGET, pid = ?self.pid, "hostapd started");
        Ok(output)
    }

    /// Requests termination of the daemon.
    ///
    /// The target is the id cached by [`start`](Self::start), falling back to
    /// `explicit`. The process-id file is removed whether or not a target is
    /// found. Returns the id a termination request was sent to.
    ///
    /// Failures are logged and swallowed: a missing process, an unreadable
    /// pid file or a failing signal utility all still return normally.
    pub fn stop(&mut self, explicit: Option<u32>) -> Option<u32> {
        let target = self.pid.or(explicit);
        let pid_file = self.config.pid_file();
        match remove_if_exists(pid_file) {
            Ok(true) => debug!(
                target: PROCESS_TARGET,
                file = %pid_file.display(),
                "removed pid file"
            ),
            Ok(false) => {}
            Err(error) => warn!(
                target: PROCESS_TARGET,
                file = %pid_file.display(),
                %error,
                "failed to remove pid file"
            ),
        }

        let Some(pid) = target else {
            debug!(target: PROCESS_TARGET, "no process id to stop");
            return None;
        };

        let args = [OsString::from(pid.to_string())];
        match self.launcher.launch(Path::new(SIGNAL_PROGRAM), &args) {
            Ok(output) if output.success() => {
                info!(target: PROCESS_TARGET, pid, "requested hostapd termination");
            }
            Ok(output) => warn!(
                target: PROCESS_TARGET,
                pid,
                code = ?output.code,
                stderr = output.stderr.as_deref().unwrap_or_default(),
                "signal delivery reported failure"
            ),
            Err(error) => warn!(
                target: PROCESS_TARGET,
                pid,
                %error,
                "failed to run signal utility"
            ),
        }
        self.pid = None;
        Some(pid)
    }

    /// Restarts the service when the configuration changed or `force` is set.
    ///
    /// The persisted file is compared byte for byte with the rendered text;
    /// a missing file counts as changed. When nothing changed and `force` is
    /// false, no file is written and the service manager is not called.
    ///
    /// # Errors
    ///
    /// - [`SupervisorError::ReadConfig`] or [`SupervisorError::WriteConfig`]
    ///   when the configuration file cannot be accessed.
    /// - [`SupervisorError::Service`] carrying the service manager's error.
    pub fn restart(&mut self, force: bool) -> Result<RestartOutcome, SupervisorError> {
        let path = self.config.config_file();
        let persisted = read_optional(path).map_err(|source| SupervisorError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        let changed = persisted.as_deref() != Some(self.config.rendered().as_bytes());
        if !force && !changed {
            info!(
                target: PROCESS_TARGET,
                config = %path.display(),
                "configuration unchanged; restart skipped"
            );
            return Ok(RestartOutcome::Unchanged);
        }

        self.write_config()?;
        info!(
            target: PROCESS_TARGET,
            service = %self.service_name,
            force,
            changed,
            "restarting service"
        );
        self.services.restart(&self.service_name)?;
        Ok(RestartOutcome::Restarted)
    }

    /// Deletes the rendered configuration file, if present.
    ///
    /// # Errors
    ///
    /// Returns [`SupervisorError::RemoveConfig`] when the file exists but
    /// cannot be removed.
    pub fn clear_config(&self) -> Result<(), SupervisorError> {
        let path = self.config.config_file();
        remove_if_exists(path)
            .map(|_| ())
            .map_err(|source| SupervisorError::RemoveConfig {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Reads the process id persisted by the daemon.
    ///
    /// # Errors
    ///
    /// Returns [`SupervisorError::ReadPid`] or [`SupervisorError::ParsePid`]
    /// when the file exists but is unreadable or malformed.
    pub fn persisted_pid(&self) -> Result<Option<u32>, SupervisorError> {
        read_pid(self.config.pid_file())
    }

    fn write_config(&self) -> Result<(), SupervisorError> {
        let path = self.config.config_file();
        atomic_write(path, self.config.rendered().as_bytes()).map_err(|source| {
            SupervisorError::WriteConfig {
                path: path.to_path_buf(),
                source,
            }
        })
    }

    fn capture_pid(&self) -> Option<u32> {
        match self.persisted_pid() {
            Ok(pid) => pid,
            Err(error) => {
                warn!(target: PROCESS_TARGET, %error, "ignoring unusable pid file");
                None
            }
        }
    }
}
