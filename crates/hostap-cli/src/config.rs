//! Configuration loading helpers for the `hostap` CLI.
//!
//! Configuration flags are filtered out of the argument list and handed to
//! `ortho_config`, while the remaining tokens are parsed by `clap` as the
//! lifecycle subcommand.

use std::ffi::{OsStr, OsString};

use hostap_config::Settings;
use ortho_config::OrthoConfig;

use crate::AppError;

/// CLI flags recognised by the settings loader.
///
/// MAINTENANCE: keep in sync with the fields of
/// [`hostap_config::Settings`].
pub(crate) const CONFIG_CLI_FLAGS: &[&str] = &[
    "--config-path",
    "--ssid",
    "--passphrase",
    "--interface",
    "--driver",
    "--hw-mode",
    "--channel",
    "--wpa",
    "--wpa-key-mgmt",
    "--wpa-pairwise",
    "--wpa-ptk-rekey",
    "--macaddr-acl",
    "--config-file",
    "--pid-file",
    "--service-name",
    "--binary",
    "--log-filter",
    "--log-format",
];

pub(crate) trait ConfigLoader {
    /// Loads settings for the CLI.
    ///
    /// # Flag Ordering
    ///
    /// Configuration flags (listed in [`CONFIG_CLI_FLAGS`]) must appear before
    /// the subcommand. Flags after it are parsed as subcommand arguments.
    fn load(&self, args: &[OsString]) -> Result<Settings, AppError>;
}

pub(crate) struct OrthoConfigLoader;

impl ConfigLoader for OrthoConfigLoader {
    fn load(&self, args: &[OsString]) -> Result<Settings, AppError> {
        Settings::load_from_iter(args.iter().cloned()).map_err(AppError::LoadConfiguration)
    }
}

#[derive(Debug, Clone, Copy)]
enum FlagAction {
    Include { needs_value: bool },
    Skip,
}

fn process_config_flag(argument: &OsStr) -> FlagAction {
    let argument_text = argument.to_string_lossy();
    if !argument_text.starts_with("--") {
        return FlagAction::Skip;
    }

    let (flag, has_inline_value) = match argument_text.split_once('=') {
        Some((flag, _value)) => (flag, true),
        None => (argument_text.as_ref(), false),
    };

    if CONFIG_CLI_FLAGS.contains(&flag) {
        return FlagAction::Include {
            needs_value: !has_inline_value,
        };
    }

    FlagAction::Skip
}

pub(crate) struct ConfigArgumentSplit {
    pub(crate) config_arguments: Vec<OsString>,
    pub(crate) command_start: usize,
}

pub(crate) fn split_config_arguments(args: &[OsString]) -> ConfigArgumentSplit {
    let Some(program) = args.first() else {
        return ConfigArgumentSplit {
            config_arguments: Vec::new(),
            command_start: 0,
        };
    };

    let mut filtered: Vec<OsString> = vec![program.clone()];
    let mut command_start = 1usize;
    let mut pending_value = false;

    for argument in args.iter().skip(1) {
        if pending_value {
            filtered.push(argument.clone());
            pending_value = false;
            command_start += 1;
            continue;
        }

        match process_config_flag(argument.as_os_str()) {
            FlagAction::Include { needs_value } => {
                filtered.push(argument.clone());
                command_start += 1;
                pending_value = needs_value;
            }
            FlagAction::Skip => break,
        }
    }

    ConfigArgumentSplit {
        config_arguments: filtered,
        command_start,
    }
}

/// Program name followed by every token from the subcommand onwards.
pub(crate) fn command_arguments(args: &[OsString], split: &ConfigArgumentSplit) -> Vec<OsString> {
    args.first()
        .into_iter()
        .chain(args.iter().skip(split.command_start))
        .cloned()
        .collect()
}
