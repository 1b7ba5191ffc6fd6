//! Access point parameters and their validating builder.
//!
//! [`ApConfig`] is immutable once built. Required fields are checked and
//! every optional field receives its documented default inside
//! [`ApConfigBuilder::build`], so a constructed value is always complete and
//! its rendered text never changes for the lifetime of the record.

use std::path::{Path, PathBuf};

use crate::defaults::{
    DEFAULT_CHANNEL, DEFAULT_CONFIG_FILE, DEFAULT_DRIVER, DEFAULT_INTERFACE, DEFAULT_WPA,
    DEFAULT_WPA_KEY_MGMT, DEFAULT_WPA_PTK_REKEY, default_hw_mode, default_pid_file,
    default_wpa_pairwise,
};
use crate::error::ConfigError;
use crate::hw_mode::HwMode;
use crate::render::render;

/// Fully defaulted access point configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApConfig {
    interface: String,
    driver: String,
    ssid: String,
    passphrase: String,
    hw_mode: HwMode,
    channel: u16,
    wpa: u8,
    wpa_key_mgmt: String,
    wpa_pairwise: Vec<String>,
    wpa_ptk_rekey: u32,
    macaddr_acl: Option<u8>,
    config_file: PathBuf,
    pid_file: PathBuf,
    rendered: String,
}

impl ApConfig {
    /// Starts a builder with no fields set.
    #[must_use]
    pub fn builder() -> ApConfigBuilder {
        ApConfigBuilder::default()
    }

    /// Wireless interface name.
    #[must_use]
    pub fn interface(&self) -> &str {
        &self.interface
    }

    /// Driver name.
    #[must_use]
    pub fn driver(&self) -> &str {
        &self.driver
    }

    /// Network name broadcast by the access point.
    #[must_use]
    pub fn ssid(&self) -> &str {
        &self.ssid
    }

    /// Pre-shared key.
    #[must_use]
    pub fn passphrase(&self) -> &str {
        &self.passphrase
    }

    /// PHY mode.
    #[must_use]
    pub const fn hw_mode(&self) -> HwMode {
        self.hw_mode
    }

    /// Radio channel.
    #[must_use]
    pub const fn channel(&self) -> u16 {
        self.channel
    }

    /// WPA protocol version bitmask.
    #[must_use]
    pub const fn wpa(&self) -> u8 {
        self.wpa
    }

    /// Key management method.
    #[must_use]
    pub fn wpa_key_mgmt(&self) -> &str {
        &self.wpa_key_mgmt
    }

    /// Pairwise cipher suites in render order.
    #[must_use]
    pub fn wpa_pairwise(&self) -> &[String] {
        &self.wpa_pairwise
    }

    /// Pairwise key rotation interval in seconds.
    #[must_use]
    pub const fn wpa_ptk_rekey(&self) -> u32 {
        self.wpa_ptk_rekey
    }

    /// MAC address access control policy, when configured.
    #[must_use]
    pub const fn macaddr_acl(&self) -> Option<u8> {
        self.macaddr_acl
    }

    /// Where the rendered configuration is written.
    #[must_use]
    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// Where the daemon records its process id.
    #[must_use]
    pub fn pid_file(&self) -> &Path {
        &self.pid_file
    }

    /// Configuration file text, rendered once when the record was built.
    #[must_use]
    pub fn rendered(&self) -> &str {
        &self.rendered
    }
}

/// Collects access point parameters prior to validation.
#[derive(Debug, Clone, Default)]
pub struct ApConfigBuilder {
    interface: Option<String>,
    driver: Option<String>,
    ssid: Option<String>,
    passphrase: Option<String>,
    hw_mode: Option<HwMode>,
    channel: Option<u16>,
    wpa: Option<u8>,
    wpa_key_mgmt: Option<String>,
    wpa_pairwise: Option<Vec<String>>,
    wpa_ptk_rekey: Option<u32>,
    macaddr_acl: Option<u8>,
    config_file: Option<PathBuf>,
    pid_file: Option<PathBuf>,
}

impl ApConfigBuilder {
    /// Sets the wireless interface name.
    #[must_use]
    pub fn interface(mut self, interface: impl Into<String>) -> Self {
        self.interface = Some(interface.into());
        self
    }

    /// Sets the driver name.
    #[must_use]
    pub fn driver(mut self, driver: impl Into<String>) -> Self {
        self.driver = Some(driver.into());
        self
    }

    /// Sets the network name. Required.
    #[must_use]
    pub fn ssid(mut self, ssid: impl Into<String>) -> Self {
        self.ssid = Some(ssid.into());
        self
    }

    /// Sets the pre-shared key. Required.
    #[must_use]
    pub fn passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.passphrase = Some(passphrase.into());
        self
    }

    /// Sets the PHY mode.
    #[must_use]
    pub const fn hw_mode(mut self, hw_mode: HwMode) -> Self {
        self.hw_mode = Some(hw_mode);
        self
    }

    /// Sets the radio channel.
    #[must_use]
    pub const fn channel(mut self, channel: u16) -> Self {
        self.channel = Some(channel);
        self
    }

    /// Sets the WPA protocol version bitmask.
    #[must_use]
    pub const fn wpa(mut self, wpa: u8) -> Self {
        self.wpa = Some(wpa);
        self
    }

    /// Sets the key management method.
    #[must_use]
    pub fn wpa_key_mgmt(mut self, wpa_key_mgmt: impl Into<String>) -> Self {
        self.wpa_key_mgmt = Some(wpa_key_mgmt.into());
        self
    }

    /// Sets the pairwise cipher suites.
    #[must_use]
    pub fn wpa_pairwise<I, S>(mut self, ciphers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.wpa_pairwise = Some(ciphers.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the pairwise key rotation interval in seconds.
    #[must_use]
    pub const fn wpa_ptk_rekey(mut self, seconds: u32) -> Self {
        self.wpa_ptk_rekey = Some(seconds);
        self
    }

    /// Enables MAC address access control with the given policy.
    #[must_use]
    pub const fn macaddr_acl(mut self, policy: u8) -> Self {
        self.macaddr_acl = Some(policy);
        self
    }

    /// Sets the rendered configuration path.
    #[must_use]
    pub fn config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Sets the process-id file path.
    #[must_use]
    pub fn pid_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.pid_file = Some(path.into());
        self
    }

    /// Validates the collected fields, applies defaults and renders the
    /// configuration text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] when the network name or
    /// pre-shared key was never set, and [`ConfigError::EmptyField`] when any
    /// supplied text, cipher list or path is empty.
    pub fn build(self) -> Result<ApConfig, ConfigError> {
        let ssid = required("ssid", self.ssid)?;
        let passphrase = required("passphrase", self.passphrase)?;
        let interface = optional("interface", self.interface, DEFAULT_INTERFACE)?;
        let driver = optional("driver", self.driver, DEFAULT_DRIVER)?;
        let wpa_key_mgmt = optional("wpa_key_mgmt", self.wpa_key_mgmt, DEFAULT_WPA_KEY_MGMT)?;
        let wpa_pairwise = ciphers(self.wpa_pairwise)?;
        let config_file = path(
            "config_file",
            self.config_file,
            PathBuf::from(DEFAULT_CONFIG_FILE),
        )?;
        let pid_file = match self.pid_file {
            Some(pid_file) => path("pid_file", Some(pid_file), PathBuf::new())?,
            None => default_pid_file(),
        };

        let mut config = ApConfig {
            interface,
            driver,
            ssid,
            passphrase,
            hw_mode: self.hw_mode.unwrap_or_else(default_hw_mode),
            channel: self.channel.unwrap_or(DEFAULT_CHANNEL),
            wpa: self.wpa.unwrap_or(DEFAULT_WPA),
            wpa_key_mgmt,
            wpa_pairwise,
            wpa_ptk_rekey: self.wpa_ptk_rekey.unwrap_or(DEFAULT_WPA_PTK_REKEY),
            macaddr_acl: self.macaddr_acl,
            config_file,
            pid_file,
            rendered: String::new(),
        };
        config.rendered = render(&config);
        Ok(config)
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<String, ConfigError> {
    let value = value.ok_or(ConfigError::MissingField { field })?;
    non_empty(field, value)
}

fn optional(
    field: &'static str,
    value: Option<String>,
    default: &str,
) -> Result<String, ConfigError> {
    match value {
        Some(value) => non_empty(field, value),
        None => Ok(default.to_owned()),
    }
}

fn non_empty(field: &'static str, value: String) -> Result<String, ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::EmptyField { field });
    }
    Ok(value)
}

fn ciphers(value: Option<Vec<String>>) -> Result<Vec<String>, ConfigError> {
    let Some(ciphers) = value else {
        return Ok(default_wpa_pairwise());
    };
    if ciphers.is_empty() || ciphers.iter().any(String::is_empty) {
        return Err(ConfigError::EmptyField {
            field: "wpa_pairwise",
        });
    }
    Ok(ciphers)
}

fn path(
    field: &'static str,
    value: Option<PathBuf>,
    default: PathBuf,
) -> Result<PathBuf, ConfigError> {
    match value {
        Some(value) if value.as_os_str().is_empty() => Err(ConfigError::EmptyField { field }),
        Some(value) => Ok(value),
        None => Ok(default),
    }
}
