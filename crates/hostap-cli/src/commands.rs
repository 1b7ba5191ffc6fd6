//! Executes lifecycle commands against a [`ProcessSupervisor`].

use std::io::Write;

use hostap_config::{ApConfig, Settings};
use hostap_supervisor::{
    ExecutableLocator, FixedLocator, ProcessLauncher, ProcessSupervisor, RestartOutcome,
    SearchPathLocator, ServiceManager, SystemLauncher, Systemctl,
};
use tracing::warn;

use crate::AppError;
use crate::cli::CliCommand;

/// Builds the supervisor that commands run against.
pub(crate) trait SupervisorFactory {
    type Launcher: ProcessLauncher;
    type Services: ServiceManager;

    fn build(
        &self,
        settings: &Settings,
        config: ApConfig,
    ) -> ProcessSupervisor<Self::Launcher, Self::Services>;
}

/// Spawns real processes and restarts units through `systemctl`.
pub(crate) struct SystemSupervisorFactory;

impl SupervisorFactory for SystemSupervisorFactory {
    type Launcher = SystemLauncher;
    type Services = Systemctl;

    fn build(
        &self,
        settings: &Settings,
        config: ApConfig,
    ) -> ProcessSupervisor<SystemLauncher, Systemctl> {
        let locator: Box<dyn ExecutableLocator> = match settings.binary() {
            Some(binary) => Box::new(FixedLocator::new(binary)),
            None => Box::new(SearchPathLocator::from_env()),
        };
        ProcessSupervisor::new(config, locator.as_ref(), SystemLauncher, Systemctl::new())
            .with_service_name(settings.service_name())
    }
}

/// Runs `command`, writing user-facing messages to `stdout`.
pub(crate) fn execute<P, S, W>(
    command: CliCommand,
    supervisor: &mut ProcessSupervisor<P, S>,
    stdout: &mut W,
) -> Result<(), AppError>
where
    P: ProcessLauncher,
    S: ServiceManager,
    W: Write,
{
    match command {
        CliCommand::Start => {
            let output = supervisor.start()?;
            match supervisor.pid() {
                Some(pid) => emit(stdout, &format!("hostapd started (pid {pid})"))?,
                None => emit(stdout, "hostapd started")?,
            }
            if let Some(fragment) = output.stdout.as_deref() {
                emit(stdout, fragment)?;
            }
        }
        CliCommand::Stop { pid } => {
            let explicit = pid.or_else(|| persisted_pid(supervisor));
            match supervisor.stop(explicit) {
                Some(pid) => emit(stdout, &format!("sent SIGTERM to pid {pid}"))?,
                None => emit(stdout, "hostapd is not running")?,
            }
        }
        CliCommand::Restart { force } => match supervisor.restart(force)? {
            RestartOutcome::Restarted => {
                let message = format!("restarted {}", supervisor.service_name());
                emit(stdout, &message)?;
            }
            RestartOutcome::Unchanged => {
                emit(stdout, "configuration unchanged; restart skipped")?;
            }
        },
        CliCommand::Render => emit(stdout, supervisor.config().rendered())?,
        CliCommand::ClearConfig => supervisor.clear_config()?,
    }
    Ok(())
}

fn persisted_pid<P, S>(supervisor: &ProcessSupervisor<P, S>) -> Option<u32>
where
    P: ProcessLauncher,
    S: ServiceManager,
{
    supervisor.persisted_pid().unwrap_or_else(|error| {
        warn!(%error, "ignoring unusable pid file");
        None
    })
}

fn emit<W: Write>(stdout: &mut W, message: &str) -> Result<(), AppError> {
    writeln!(stdout, "{message}").map_err(AppError::WriteOutput)
}
