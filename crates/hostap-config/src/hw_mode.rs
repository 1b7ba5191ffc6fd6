use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Operating mode of the radio, rendered as `hw_mode=`.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, Hash, EnumString, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum HwMode {
    /// IEEE 802.11a (5 GHz).
    A,
    /// IEEE 802.11b (2.4 GHz).
    B,
    /// IEEE 802.11g (2.4 GHz).
    #[default]
    G,
    /// IEEE 802.11ad (60 GHz).
    Ad,
    /// Let the driver pick; only valid with automatic channel selection.
    Any,
}

/// Errors encountered while parsing a [`HwMode`] from text.
pub type HwModeParseError = strum::ParseError;
