//! Output formats accepted by `--log-format` and `HOSTAP_LOG_FORMAT`.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Shape of the log lines the `hostap` binary writes to stderr.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// One JSON object per event, fields flattened.
    #[default]
    Json,
    /// Single-line text for interactive use.
    Compact,
}

/// Error returned when `--log-format` names an unknown format.
pub type LogFormatParseError = strum::ParseError;
