//! Command-line runtime for the `hostap` access point supervisor.
//!
//! The runtime splits configuration flags from the lifecycle subcommand,
//! loads layered [`Settings`](hostap_config::Settings), installs telemetry
//! and runs the command against a [`ProcessSupervisor`]. Configuration
//! loading, supervisor construction and IO streams can all be substituted in
//! tests.
//!
//! [`ProcessSupervisor`]: hostap_supervisor::ProcessSupervisor

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use clap::Parser;

mod cli;
mod commands;
mod config;
mod errors;
mod telemetry;

use cli::Cli;
use commands::{SupervisorFactory, SystemSupervisorFactory, execute};
use config::{ConfigLoader, OrthoConfigLoader, command_arguments, split_config_arguments};
pub(crate) use errors::AppError;

/// Bundles the IO streams provided to the CLI runtime.
pub(crate) struct IoStreams<'a, W: Write, E: Write> {
    pub(crate) stdout: &'a mut W,
    pub(crate) stderr: &'a mut E,
}

impl<'a, W: Write, E: Write> IoStreams<'a, W, E> {
    pub(crate) fn new(stdout: &'a mut W, stderr: &'a mut E) -> Self {
        Self { stdout, stderr }
    }
}

struct CliRunner<'a, W: Write, E: Write, L: ConfigLoader, F: SupervisorFactory> {
    io: IoStreams<'a, W, E>,
    loader: &'a L,
    factory: &'a F,
}

impl<'a, W, E, L, F> CliRunner<'a, W, E, L, F>
where
    W: Write,
    E: Write,
    L: ConfigLoader,
    F: SupervisorFactory,
{
    fn new(io: IoStreams<'a, W, E>, loader: &'a L, factory: &'a F) -> Self {
        Self {
            io,
            loader,
            factory,
        }
    }

    fn run<I>(&mut self, args: I) -> ExitCode
    where
        I: IntoIterator<Item = OsString>,
    {
        let args: Vec<OsString> = args.into_iter().collect();
        let split = split_config_arguments(&args);

        let cli = match Cli::try_parse_from(command_arguments(&args, &split)) {
            Ok(cli) => cli,
            Err(error) if !error.use_stderr() => {
                let _ = write!(self.io.stdout, "{error}");
                return ExitCode::SUCCESS;
            }
            Err(error) => {
                self.report(&AppError::CliUsage(error));
                return ExitCode::FAILURE;
            }
        };

        let result = self.loader.load(&split.config_arguments).and_then(|settings| {
            telemetry::initialise(&settings)?;
            let config = settings.ap_config()?;
            let mut supervisor = self.factory.build(&settings, config);
            execute(cli.command, &mut supervisor, &mut *self.io.stdout)
        });

        match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(error) => {
                self.report(&error);
                ExitCode::FAILURE
            }
        }
    }

    fn report(&mut self, error: &AppError) {
        let _ = writeln!(self.io.stderr, "{error}");
        if let Some(fragment) = error.launch_diagnostics() {
            let _ = writeln!(self.io.stderr, "{fragment}");
        }
    }
}

/// Runs the CLI using the provided arguments and IO handles.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    run_with(
        args,
        IoStreams::new(stdout, stderr),
        &OrthoConfigLoader,
        &SystemSupervisorFactory,
    )
}

/// Runs the CLI with a custom configuration loader and supervisor factory.
pub(crate) fn run_with<I, W, E, L, F>(
    args: I,
    io: IoStreams<'_, W, E>,
    loader: &L,
    factory: &F,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
    L: ConfigLoader,
    F: SupervisorFactory,
{
    CliRunner::new(io, loader, factory).run(args)
}

#[cfg(test)]
mod tests;
