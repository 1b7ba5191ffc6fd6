//! CLI entrypoint for the `hostap` access point supervisor.
//!
//! The binary delegates to [`hostap_cli::run`], which loads layered settings,
//! installs telemetry and drives the `hostapd` lifecycle command requested on
//! the command line.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    hostap_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
