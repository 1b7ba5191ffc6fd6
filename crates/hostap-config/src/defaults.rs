//! Built-in defaults applied when a field is left unset.

use std::env;
use std::path::PathBuf;

use uuid::Uuid;

use crate::hw_mode::HwMode;
use crate::logging::LogFormat;

/// Wireless interface the access point binds to.
pub const DEFAULT_INTERFACE: &str = "wlan0";

/// Kernel driver interface used by `hostapd`.
pub const DEFAULT_DRIVER: &str = "nl80211";

/// Radio channel used when none is configured.
pub const DEFAULT_CHANNEL: u16 = 11;

/// WPA protocol version bitmask (1 = WPA, 2 = WPA2).
pub const DEFAULT_WPA: u8 = 1;

/// Key management method advertised to stations.
pub const DEFAULT_WPA_KEY_MGMT: &str = "WPA-PSK";

/// Pairwise cipher suites, in the order they are rendered.
pub const DEFAULT_WPA_PAIRWISE: &[&str] = &["TKIP", "CCMP"];

/// Pairwise transient key rotation interval in seconds.
pub const DEFAULT_WPA_PTK_REKEY: u32 = 600;

/// Location of the rendered daemon configuration.
pub const DEFAULT_CONFIG_FILE: &str = "/etc/hostapd/hostapd.conf";

/// Unit name passed to the service manager on restart.
pub const DEFAULT_SERVICE_NAME: &str = "hostapd.service";

/// File name of the process-id file shared by successive `hostap` runs.
pub const DEFAULT_SETTINGS_PID_FILE_NAME: &str = "hostapd.pid";

/// Default log filter expression used by the binaries.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default PHY mode.
#[must_use]
pub const fn default_hw_mode() -> HwMode {
    HwMode::G
}

/// Default pairwise cipher list as owned strings.
#[must_use]
pub fn default_wpa_pairwise() -> Vec<String> {
    DEFAULT_WPA_PAIRWISE
        .iter()
        .map(|cipher| (*cipher).to_owned())
        .collect()
}

/// Computes a fresh process-id file path under the temporary directory.
///
/// Every call yields a distinct file name so two configurations never share
/// a pid file by accident.
#[must_use]
pub fn default_pid_file() -> PathBuf {
    env::temp_dir().join(format!("{}.pid", Uuid::new_v4()))
}

/// Process-id file used by [`Settings`](crate::Settings) when none is set.
///
/// Unlike [`default_pid_file`] the path is stable, so a `stop` run can find
/// the file written by an earlier `start` run.
#[must_use]
pub fn default_settings_pid_file() -> PathBuf {
    env::temp_dir().join(DEFAULT_SETTINGS_PID_FILE_NAME)
}

/// Default log filter expression used by the binaries.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Default logging format for the binaries.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Json
}
