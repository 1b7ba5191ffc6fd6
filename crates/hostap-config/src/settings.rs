//! Layered operator settings for the `hostap` binary.
//!
//! [`Settings`] is loaded through `ortho_config`, so every field may come from
//! a configuration file, a `HOSTAP_*` environment variable or a command-line
//! flag. Access point fields are optional overrides: anything left unset
//! falls back to the defaults applied by [`ApConfigBuilder::build`], except
//! the process-id file, which defaults to a fixed path so separate runs of the
//! binary agree on it.

use std::path::{Path, PathBuf};

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::ap::{ApConfig, ApConfigBuilder};
use crate::defaults::{
    DEFAULT_LOG_FILTER, DEFAULT_SERVICE_NAME, default_log_format, default_settings_pid_file,
};
use crate::error::ConfigError;
use crate::hw_mode::HwMode;
use crate::logging::LogFormat;

/// Operator-facing settings resolved from files, environment and flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "HOSTAP")]
#[serde(default)]
pub struct Settings {
    /// Network name.
    pub ssid: Option<String>,
    /// Pre-shared key.
    pub passphrase: Option<String>,
    /// Wireless interface name.
    pub interface: Option<String>,
    /// Driver name.
    pub driver: Option<String>,
    /// PHY mode.
    pub hw_mode: Option<HwMode>,
    /// Radio channel.
    pub channel: Option<u16>,
    /// WPA protocol version bitmask.
    pub wpa: Option<u8>,
    /// Key management method.
    pub wpa_key_mgmt: Option<String>,
    /// Space separated pairwise cipher suites.
    pub wpa_pairwise: Option<String>,
    /// Pairwise key rotation interval in seconds.
    pub wpa_ptk_rekey: Option<u32>,
    /// MAC address access control policy.
    pub macaddr_acl: Option<u8>,
    /// Rendered configuration path.
    pub config_file: Option<PathBuf>,
    /// Process-id file path.
    pub pid_file: Option<PathBuf>,
    /// Unit restarted by `restart`.
    pub service_name: Option<String>,
    /// Explicit daemon executable, bypassing the search path.
    pub binary: Option<PathBuf>,
    /// Tracing filter expression.
    pub log_filter: Option<String>,
    /// Log output format.
    pub log_format: Option<LogFormat>,
}

impl Settings {
    /// Builds a validated [`ApConfig`] from the access point overrides.
    ///
    /// # Errors
    ///
    /// Propagates [`ConfigError`] from [`ApConfigBuilder::build`].
    pub fn ap_config(&self) -> Result<ApConfig, ConfigError> {
        let builder = ApConfig::builder();
        let builder = apply(builder, self.ssid.clone(), ApConfigBuilder::ssid);
        let builder = apply(builder, self.passphrase.clone(), ApConfigBuilder::passphrase);
        let builder = apply(builder, self.interface.clone(), ApConfigBuilder::interface);
        let builder = apply(builder, self.driver.clone(), ApConfigBuilder::driver);
        let builder = apply(builder, self.hw_mode, ApConfigBuilder::hw_mode);
        let builder = apply(builder, self.channel, ApConfigBuilder::channel);
        let builder = apply(builder, self.wpa, ApConfigBuilder::wpa);
        let builder = apply(builder, self.wpa_key_mgmt.clone(), ApConfigBuilder::wpa_key_mgmt);
        let builder = apply(builder, self.wpa_pairwise.as_deref(), |builder, ciphers| {
            builder.wpa_pairwise(ciphers.split_whitespace())
        });
        let builder = apply(builder, self.wpa_ptk_rekey, ApConfigBuilder::wpa_ptk_rekey);
        let builder = apply(builder, self.macaddr_acl, ApConfigBuilder::macaddr_acl);
        let builder = apply(builder, self.config_file.clone(), ApConfigBuilder::config_file);
        builder.pid_file(self.pid_file()).build()
    }

    /// Service unit restarted by `restart`.
    #[must_use]
    pub fn service_name(&self) -> &str {
        self.service_name.as_deref().unwrap_or(DEFAULT_SERVICE_NAME)
    }

    /// Process-id file, falling back to [`default_settings_pid_file`].
    #[must_use]
    pub fn pid_file(&self) -> PathBuf {
        self.pid_file.clone().unwrap_or_else(default_settings_pid_file)
    }

    /// Explicit daemon executable, if configured.
    #[must_use]
    pub fn binary(&self) -> Option<&Path> {
        self.binary.as_deref()
    }

    /// Tracing filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }

    /// Log output format.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format.unwrap_or_else(default_log_format)
    }
}

fn apply<T>(
    builder: ApConfigBuilder,
    value: Option<T>,
    set: impl FnOnce(ApConfigBuilder, T) -> ApConfigBuilder,
) -> ApConfigBuilder {
    match value {
        Some(value) => set(builder, value),
        None => builder,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_credentials() -> Settings {
        Settings {
            ssid: Some(String::from("Net1")),
            passphrase: Some(String::from("secret123")),
            ..Settings::default()
        }
    }

    #[test]
    fn accessors_fall_back_to_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.service_name(), "hostapd.service");
        assert_eq!(settings.log_filter(), "info");
        assert_eq!(settings.log_format(), LogFormat::Json);
        assert!(settings.binary().is_none());
    }

    #[test]
    fn converts_credentials_into_defaulted_config() {
        let config = with_credentials().ap_config().expect("config should build");
        assert_eq!(config.ssid(), "Net1");
        assert_eq!(config.interface(), "wlan0");
        assert_eq!(config.channel(), 11);
        assert_eq!(config.wpa(), 1);
    }

    #[test]
    fn pid_file_is_stable_across_conversions() {
        let first = with_credentials().ap_config().expect("first config");
        let second = with_credentials().ap_config().expect("second config");
        assert_eq!(first.pid_file(), default_settings_pid_file());
        assert_eq!(first.pid_file(), second.pid_file());
    }

    #[test]
    fn explicit_pid_file_wins() {
        let settings = Settings {
            pid_file: Some(PathBuf::from("/run/hostapd.pid")),
            ..with_credentials()
        };
        let config = settings.ap_config().expect("config should build");
        assert_eq!(config.pid_file(), Path::new("/run/hostapd.pid"));
    }

    #[test]
    fn splits_cipher_list_on_whitespace() {
        let settings = Settings {
            wpa_pairwise: Some(String::from("CCMP  GCMP")),
            ..with_credentials()
        };
        let config = settings.ap_config().expect("config should build");
        assert_eq!(config.wpa_pairwise(), ["CCMP", "GCMP"]);
    }

    #[test]
    fn blank_cipher_list_is_rejected() {
        let settings = Settings {
            wpa_pairwise: Some(String::from("   ")),
            ..with_credentials()
        };
        assert_eq!(
            settings.ap_config(),
            Err(ConfigError::EmptyField {
                field: "wpa_pairwise"
            })
        );
    }

    #[test]
    fn missing_credentials_fail_validation() {
        assert_eq!(
            Settings::default().ap_config(),
            Err(ConfigError::MissingField { field: "ssid" })
        );
    }

    #[test]
    fn overrides_reach_the_rendered_text() {
        let settings = Settings {
            interface: Some(String::from("wlan1")),
            hw_mode: Some(HwMode::A),
            channel: Some(36),
            ..with_credentials()
        };
        let config = settings.ap_config().expect("config should build");
        let rendered = config.rendered();
        assert!(rendered.contains("interface=wlan1\n"));
        assert!(rendered.contains("hw_mode=a\n"));
        assert!(rendered.contains("channel=36\n"));
    }
}
