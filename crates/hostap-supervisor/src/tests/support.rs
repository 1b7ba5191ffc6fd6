//! Collaborator doubles shared by the unit and behavioural suites.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use hostap_config::ApConfig;
use mockall::mock;
use tempfile::TempDir;

use crate::launcher::{LaunchOutput, ProcessLauncher};
use crate::locator::{ExecutableLocator, FixedLocator};
use crate::service::{ServiceError, ServiceManager};
use crate::supervisor::{ProcessSupervisor, RestartOutcome};
use crate::{DAEMON_BINARY, SIGNAL_PROGRAM, SupervisorError};

mock! {
    pub Launcher {}
    impl ProcessLauncher for Launcher {
        fn launch(&self, program: &Path, args: &[OsString]) -> io::Result<LaunchOutput>;
    }
}

mock! {
    pub Locator {}
    impl ExecutableLocator for Locator {
        fn search_path(&self) -> OsString;
        fn locate(&self, name: &str) -> Option<PathBuf>;
    }
}

mock! {
    pub Services {}
    impl ServiceManager for Services {
        fn restart(&self, service: &str) -> Result<(), ServiceError>;
    }
}

/// Fake binary location used by every double.
pub const FAKE_BINARY: &str = "/usr/sbin/hostapd";

/// Search path reported by [`missing_locator`].
pub const MISSING_SEARCH_PATH: &str = "/usr/bin:/sbin";

/// Locator that probes once for the daemon and finds nothing.
pub fn missing_locator() -> MockLocator {
    let mut locator = MockLocator::new();
    locator
        .expect_locate()
        .withf(|name| name == DAEMON_BINARY)
        .once()
        .returning(|_name| None);
    locator
        .expect_search_path()
        .returning(|| OsString::from(MISSING_SEARCH_PATH));
    locator
}

/// Builds the `Net1`/`secret123` configuration with files inside `dir`.
pub fn config_in(dir: &TempDir) -> ApConfig {
    config_named(dir, "Net1", "secret123")
}

/// Builds a configuration with the given credentials and files inside `dir`.
pub fn config_named(dir: &TempDir, ssid: &str, passphrase: &str) -> ApConfig {
    ApConfig::builder()
        .ssid(ssid)
        .passphrase(passphrase)
        .config_file(dir.path().join("hostapd.conf"))
        .pid_file(dir.path().join("hostapd.pid"))
        .build()
        .expect("test configuration should be valid")
}

/// Returns the value following `flag` in `args`.
pub fn flag_value<'a>(args: &'a [OsString], flag: &str) -> Option<&'a Path> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|index| args.get(index + 1))
        .map(Path::new)
}

/// One invocation seen by [`RecordingLauncher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

#[derive(Debug, Default)]
struct LauncherState {
    invocations: Vec<Invocation>,
    daemon_pid: Option<u32>,
    daemon_code: i32,
}

/// Launcher that behaves like `hostapd -B`: it writes the pid file named by
/// `-P` and exits with a configurable code.
#[derive(Debug, Clone, Default)]
pub struct RecordingLauncher {
    state: Arc<Mutex<LauncherState>>,
}

impl RecordingLauncher {
    /// Pid the fake daemon writes on launch.
    pub fn daemon_writes_pid(&self, pid: u32) {
        self.lock().daemon_pid = Some(pid);
    }

    /// Exit code the fake daemon launcher reports.
    pub fn daemon_exits_with(&self, code: i32) {
        self.lock().daemon_code = code;
    }

    /// Every invocation so far.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.lock().invocations.clone()
    }

    /// Pids passed to the signal utility.
    pub fn signalled(&self) -> Vec<String> {
        self.invocations()
            .into_iter()
            .filter(|invocation| invocation.program == Path::new(SIGNAL_PROGRAM))
            .flat_map(|invocation| invocation.args)
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LauncherState> {
        self.state.lock().expect("launcher state lock")
    }
}

impl ProcessLauncher for RecordingLauncher {
    fn launch(&self, program: &Path, args: &[OsString]) -> io::Result<LaunchOutput> {
        let mut state = self.lock();
        state.invocations.push(Invocation {
            program: program.to_path_buf(),
            args: args.to_vec(),
        });
        if !program.ends_with(DAEMON_BINARY) {
            return Ok(LaunchOutput::exited(0));
        }
        if let (Some(pid), Some(pid_file)) = (state.daemon_pid, flag_value(args, "-P")) {
            fs::write(pid_file, format!("{pid}\n"))?;
        }
        Ok(LaunchOutput {
            code: Some(state.daemon_code),
            stdout: Some(String::from("Configuration file: hostapd.conf")),
            stderr: (state.daemon_code != 0).then(|| String::from("Could not set channel")),
        })
    }
}

/// Service manager that counts restarts.
#[derive(Debug, Clone, Default)]
pub struct RecordingServices {
    restarts: Arc<Mutex<Vec<String>>>,
}

impl RecordingServices {
    /// Services restarted so far, in order.
    pub fn restarts(&self) -> Vec<String> {
        self.restarts.lock().expect("restart log lock").clone()
    }
}

impl ServiceManager for RecordingServices {
    fn restart(&self, service: &str) -> Result<(), ServiceError> {
        self.restarts
            .lock()
            .expect("restart log lock")
            .push(service.to_owned());
        Ok(())
    }
}

/// Scenario world shared across BDD steps.
pub struct TestWorld {
    pub dir: TempDir,
    pub launcher: RecordingLauncher,
    pub services: RecordingServices,
    supervisor: Option<ProcessSupervisor<RecordingLauncher, RecordingServices>>,
    binary_available: bool,
    pub start_result: Option<Result<LaunchOutput, SupervisorError>>,
    pub stop_result: Option<Option<u32>>,
    pub restart_results: Vec<Result<RestartOutcome, SupervisorError>>,
}

impl TestWorld {
    /// Builds a world whose fake daemon binary is available.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("scenario temp dir"),
            launcher: RecordingLauncher::default(),
            services: RecordingServices::default(),
            supervisor: None,
            binary_available: true,
            start_result: None,
            stop_result: None,
            restart_results: Vec::new(),
        }
    }

    /// Makes the locator report a missing binary for future supervisors.
    pub fn hide_binary(&mut self) {
        self.binary_available = false;
    }

    /// Builds the supervisor for the given credentials.
    pub fn configure(&mut self, ssid: &str, passphrase: &str) {
        let config = config_named(&self.dir, ssid, passphrase);
        let launcher = self.launcher.clone();
        let services = self.services.clone();
        let supervisor = if self.binary_available {
            ProcessSupervisor::new(config, &FixedLocator::new(FAKE_BINARY), launcher, services)
        } else {
            ProcessSupervisor::new(config, &missing_locator(), launcher, services)
        };
        self.supervisor = Some(supervisor);
    }

    /// Active supervisor.
    pub fn supervisor(&mut self) -> &mut ProcessSupervisor<RecordingLauncher, RecordingServices> {
        self.supervisor
            .as_mut()
            .expect("a configuration step should build the supervisor")
    }

    /// Path of the configuration file.
    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("hostapd.conf")
    }

    /// Path of the process-id file.
    pub fn pid_path(&self) -> PathBuf {
        self.dir.path().join("hostapd.pid")
    }
}

/// Constructs a fresh world for each scenario.
pub fn world() -> std::cell::RefCell<TestWorld> {
    std::cell::RefCell::new(TestWorld::new())
}
