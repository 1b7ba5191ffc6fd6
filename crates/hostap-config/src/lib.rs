//! Access point configuration for the `hostapd` supervisor.
//!
//! The crate owns three concerns:
//! - [`ApConfig`] and its [`ApConfigBuilder`], which validate required fields
//!   and apply documented defaults at construction time.
//! - [`render`], the deterministic `hostapd.conf` renderer whose output backs
//!   the diff-aware restart check.
//! - [`Settings`], the layered operator configuration loaded through
//!   `ortho_config` by the `hostap` binary.

mod ap;
mod defaults;
mod error;
mod hw_mode;
mod logging;
mod render;
mod settings;

pub use ap::{ApConfig, ApConfigBuilder};
pub use defaults::{
    DEFAULT_CHANNEL, DEFAULT_CONFIG_FILE, DEFAULT_DRIVER, DEFAULT_INTERFACE, DEFAULT_LOG_FILTER,
    DEFAULT_SERVICE_NAME, DEFAULT_SETTINGS_PID_FILE_NAME, DEFAULT_WPA, DEFAULT_WPA_KEY_MGMT, DEFAULT_WPA_PAIRWISE,
    DEFAULT_WPA_PTK_REKEY, default_hw_mode, default_log_filter, default_log_format,
    default_pid_file, default_settings_pid_file, default_wpa_pairwise,
};
pub use error::ConfigError;
pub use hw_mode::{HwMode, HwModeParseError};
pub use logging::{LogFormat, LogFormatParseError};
pub use render::render;
pub use settings::Settings;
