//! Command-line surface of the `hostap` binary.

use clap::{Parser, Subcommand};

/// Command-line interface for the access point supervisor.
///
/// Configuration flags such as `--ssid` are split off before this parser
/// runs, so they must precede the subcommand.
#[derive(Parser, Debug)]
#[command(name = "hostap", disable_help_subcommand = true)]
pub(crate) struct Cli {
    /// Lifecycle command to run.
    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

/// Lifecycle commands.
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CliCommand {
    /// Writes the configuration and launches hostapd in the background.
    Start,
    /// Sends SIGTERM to the running hostapd.
    Stop {
        /// Process id to stop; defaults to the one recorded in the pid file.
        #[arg(long)]
        pid: Option<u32>,
    },
    /// Restarts the hostapd service when the configuration changed.
    Restart {
        /// Restart even when the configuration is unchanged.
        #[arg(long)]
        force: bool,
    },
    /// Prints the rendered configuration.
    Render,
    /// Removes the configuration file.
    ClearConfig,
}
