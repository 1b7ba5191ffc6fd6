//! Renders an [`ApConfig`] into `hostapd.conf` text.
//!
//! The output is a pure function of the record: keys appear in a fixed
//! order, one `key=value` per line, joined by `\n` without a trailing
//! newline. Restart decisions compare this text byte for byte against the
//! file on disk, so any change to the layout changes restart behaviour.

use crate::ap::ApConfig;

/// Produces the configuration file text for `config`.
#[must_use]
pub fn render(config: &ApConfig) -> String {
    let mut lines = vec![
        format!("interface={}", config.interface()),
        format!("driver={}", config.driver()),
        format!("ssid={}", config.ssid()),
        format!("wpa_passphrase={}", config.passphrase()),
        format!("hw_mode={}", config.hw_mode()),
        format!("channel={}", config.channel()),
        format!("wpa={}", config.wpa()),
        format!("wpa_key_mgmt={}", config.wpa_key_mgmt()),
        format!("wpa_pairwise={}", config.wpa_pairwise().join(" ")),
        format!("wpa_ptk_rekey={}", config.wpa_ptk_rekey()),
    ];
    if let Some(policy) = config.macaddr_acl() {
        lines.push(format!("macaddr_acl={policy}"));
    }
    lines.join("\n")
}
