//! Fakes standing in for configuration loading and process control.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};

use hostap_config::{ApConfig, Settings};
use hostap_supervisor::{
    FixedLocator, LaunchOutput, ProcessLauncher, ProcessSupervisor, ServiceError, ServiceManager,
};
use tempfile::TempDir;

use crate::AppError;
use crate::commands::SupervisorFactory;
use crate::config::ConfigLoader;

/// Loader returning fixed settings and recording the arguments it saw.
pub struct StaticLoader {
    settings: Settings,
    seen: Mutex<Vec<OsString>>,
}

impl StaticLoader {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn seen(&self) -> Vec<OsString> {
        self.seen.lock().expect("loader lock").clone()
    }
}

impl ConfigLoader for StaticLoader {
    fn load(&self, args: &[OsString]) -> Result<Settings, AppError> {
        *self.seen.lock().expect("loader lock") = args.to_vec();
        Ok(self.settings.clone())
    }
}

/// Settings for `Net1` with files under `dir`.
pub fn settings_in(dir: &TempDir) -> Settings {
    Settings {
        ssid: Some(String::from("Net1")),
        passphrase: Some(String::from("secret123")),
        config_file: Some(dir.path().join("hostapd.conf")),
        pid_file: Some(dir.path().join("hostapd.pid")),
        log_format: Some(hostap_config::LogFormat::Compact),
        ..Settings::default()
    }
}

/// Launcher imitating `hostapd -B` and `kill`.
#[derive(Clone, Default)]
pub struct FakeLauncher {
    pub daemon_pid: Option<u32>,
    pub daemon_code: i32,
    pub signalled: Arc<Mutex<Vec<String>>>,
}

impl ProcessLauncher for FakeLauncher {
    fn launch(&self, program: &Path, args: &[OsString]) -> io::Result<LaunchOutput> {
        if program == Path::new("kill") {
            let mut signalled = self.signalled.lock().expect("signal lock");
            signalled.extend(args.iter().map(|arg| arg.to_string_lossy().into_owned()));
            return Ok(LaunchOutput::exited(0));
        }
        let pid_file = args
            .iter()
            .position(|arg| arg == "-P")
            .and_then(|index| args.get(index + 1));
        if let (Some(pid), Some(pid_file)) = (self.daemon_pid, pid_file) {
            fs::write(pid_file, pid.to_string())?;
        }
        Ok(LaunchOutput {
            code: Some(self.daemon_code),
            stdout: Some(String::from("wlan0: AP-ENABLED")),
            stderr: (self.daemon_code != 0).then(|| String::from("Could not set channel")),
        })
    }
}

/// Service manager recording restarted units.
#[derive(Clone, Default)]
pub struct FakeServices {
    pub restarted: Arc<Mutex<Vec<String>>>,
}

impl ServiceManager for FakeServices {
    fn restart(&self, service: &str) -> Result<(), ServiceError> {
        self.restarted
            .lock()
            .expect("restart lock")
            .push(service.to_owned());
        Ok(())
    }
}

/// Factory wiring the fakes with a fixed daemon path.
#[derive(Clone, Default)]
pub struct FakeFactory {
    pub launcher: FakeLauncher,
    pub services: FakeServices,
}

impl SupervisorFactory for FakeFactory {
    type Launcher = FakeLauncher;
    type Services = FakeServices;

    fn build(
        &self,
        settings: &Settings,
        config: ApConfig,
    ) -> ProcessSupervisor<FakeLauncher, FakeServices> {
        ProcessSupervisor::new(
            config,
            &FixedLocator::new("/usr/sbin/hostapd"),
            self.launcher.clone(),
            self.services.clone(),
        )
        .with_service_name(settings.service_name())
    }
}
