use serde::{Deserialize, Deserializer, Serialize};
use serde_valid::Validate;
use std::collections::BTreeMap;

/// Sentinel entry the device puts into scan lists when nothing was found
pub const NO_NETWORK_SSID: &str = "--none--";

/// Device configuration as reported by `GetConfig`
///
/// Per-interface entries live at the top level of the JSON object, keyed by
/// the names listed in `NetDevs`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(rename = "SysName", default)]
    pub sys_name: String,
    #[serde(rename = "NetDevs", default)]
    pub net_devs: Vec<String>,
    #[serde(rename = "WPAInfo", default)]
    pub wpa_info: WpaInfo,
    #[serde(rename = "About", default)]
    pub about: Vec<String>,
    #[serde(flatten, deserialize_with = "lenient::interface_map")]
    pub interfaces: BTreeMap<String, InterfaceConfig>,
}

impl Config {
    pub fn interface(&self, name: &str) -> Option<&InterfaceConfig> {
        self.interfaces.get(name)
    }

    pub fn interface_mut(&mut self, name: &str) -> Option<&mut InterfaceConfig> {
        self.interfaces.get_mut(name)
    }

    /// Interfaces in display order. Names in `NetDevs` without an entry are skipped.
    pub fn interfaces_in_order(&self) -> impl Iterator<Item = (&str, &InterfaceConfig)> {
        self.net_devs
            .iter()
            .filter_map(|name| self.interfaces.get(name).map(|cfg| (name.as_str(), cfg)))
    }
}

/// Settings of a single network interface
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InterfaceConfig {
    #[serde(rename = "Enabled", default, deserialize_with = "lenient::flag")]
    pub enabled: bool,
    #[serde(rename = "DHCP", default, deserialize_with = "lenient::flag")]
    pub dhcp: bool,
    #[serde(rename = "IPAddr", default)]
    pub ip_addr: String,
    #[serde(rename = "Router", default)]
    pub router: String,
    #[serde(rename = "DNS1", default)]
    pub dns1: String,
    #[serde(rename = "DNS2", default)]
    pub dns2: String,
}

impl InterfaceConfig {
    /// Static address fields only matter for enabled interfaces without DHCP
    pub fn uses_static_address(&self) -> bool {
        self.enabled && !self.dhcp
    }
}

/// wpa_supplicant settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WpaInfo {
    #[serde(rename = "Valid", default, deserialize_with = "lenient::flag")]
    pub valid: bool,
    #[serde(rename = "SSID", default)]
    pub ssid: String,
    #[serde(rename = "KeyMGMT", default)]
    pub key_mgmt: String,
    #[serde(rename = "Password", default)]
    pub password: String,
    #[serde(rename = "Country", default)]
    pub country: String,
    /// Set once the operator picked a network in this session
    #[serde(rename = "Changed", default, deserialize_with = "lenient::flag")]
    pub changed: bool,
}

impl WpaInfo {
    pub fn has_password(&self) -> bool {
        !self.password.is_empty()
    }
}

/// A proposed system (host) name
///
/// First character alphanumeric or underscore, then 3 to 63 alphanumerics,
/// hyphens or underscores.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct SysNameRequest {
    #[validate(pattern = r"^[A-Za-z0-9_][A-Za-z0-9_-]{3,63}$")]
    pub name: String,
}

impl SysNameRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Encryption {
    On,
    #[default]
    #[serde(other)]
    Off,
}

/// One entry of a Wifi scan
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WifiNetwork {
    #[serde(rename = "SSID", default)]
    pub ssid: String,
    #[serde(rename = "Quality", default, deserialize_with = "lenient::quality")]
    pub quality: u32,
    #[serde(rename = "Encryption", default)]
    pub encryption: Encryption,
}

impl WifiNetwork {
    pub fn requires_password(&self) -> bool {
        self.encryption == Encryption::On
    }

    pub fn is_placeholder(&self) -> bool {
        self.ssid == NO_NETWORK_SSID
    }
}

/// Decoders for the loosely typed values the device emits (`0`/`1` flags,
/// numbers as strings).
mod lenient {
    use super::*;
    use serde::de::Error;
    use serde_json::Value;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Bool(bool),
        Int(i64),
        Float(f64),
        Text(String),
        Null(()),
    }

    pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        match Loose::deserialize(deserializer)? {
            Loose::Bool(b) => Ok(b),
            Loose::Int(i) => Ok(i != 0),
            Loose::Float(f) => Ok(f != 0.0),
            Loose::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "" | "0" | "false" | "off" | "no" => Ok(false),
                "1" | "true" | "on" | "yes" => Ok(true),
                other => Err(D::Error::custom(format!("invalid flag value: {other}"))),
            },
            Loose::Null(()) => Ok(false),
        }
    }

    pub fn quality<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        match Loose::deserialize(deserializer)? {
            Loose::Int(i) => Ok(i.clamp(0, u32::MAX as i64) as u32),
            Loose::Float(f) => Ok(f.max(0.0).round() as u32),
            Loose::Text(s) => s
                .trim()
                .trim_end_matches('%')
                .parse()
                .map_err(|e| D::Error::custom(format!("invalid quality {s:?}: {e}"))),
            Loose::Bool(_) | Loose::Null(()) => Ok(0),
        }
    }

    /// Collects the top-level keys that hold interface objects, ignoring the rest
    pub fn interface_map<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<String, InterfaceConfig>, D::Error> {
        let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
        let mut interfaces = BTreeMap::new();
        for (name, value) in raw {
            if !value.is_object() {
                continue;
            }
            match serde_json::from_value::<InterfaceConfig>(value) {
                Ok(cfg) => {
                    interfaces.insert(name, cfg);
                }
                Err(e) => log::warn!("ignoring config entry {name}: {e}"),
            }
        }
        Ok(interfaces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "SysName": "raspberrypi",
        "NetDevs": ["wlan0", "eth0"],
        "About": ["Model: Raspberry Pi 4", "OS: Raspbian"],
        "WPAInfo": {
            "Valid": 1,
            "SSID": "Okima",
            "KeyMGMT": "WPA-PSK",
            "Password": "secret",
            "Country": "US"
        },
        "eth0": {
            "Enabled": 1,
            "DHCP": 1,
            "IPAddr": "",
            "Router": "",
            "DNS1": "",
            "DNS2": ""
        },
        "wlan0": {
            "Enabled": 0,
            "DHCP": 0,
            "IPAddr": "192.168.1.31/24",
            "Router": "192.168.1.1",
            "DNS1": "1.0.0.1",
            "DNS2": "1.1.1.1"
        }
    }"#;

    #[test]
    fn decodes_device_snapshot_with_integer_flags() {
        let config: Config = serde_json::from_str(SNAPSHOT).unwrap();

        assert_eq!(config.sys_name, "raspberrypi");
        assert_eq!(config.net_devs, vec!["wlan0", "eth0"]);
        assert!(config.wpa_info.valid);
        assert!(!config.wpa_info.changed);
        assert_eq!(config.wpa_info.key_mgmt, "WPA-PSK");

        let eth0 = config.interface("eth0").unwrap();
        assert!(eth0.enabled && eth0.dhcp);
        let wlan0 = config.interface("wlan0").unwrap();
        assert!(!wlan0.enabled);
        assert_eq!(wlan0.ip_addr, "192.168.1.31/24");
    }

    #[test]
    fn interfaces_follow_net_devs_order() {
        let config: Config = serde_json::from_str(SNAPSHOT).unwrap();

        let names: Vec<&str> = config.interfaces_in_order().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["wlan0", "eth0"]);
    }

    #[test]
    fn ignores_non_interface_top_level_keys() {
        let config: Config = serde_json::from_str(
            r#"{"SysName": "pi", "NetDevs": ["eth0"], "Version": "1.2", "eth0": {"Enabled": true}}"#,
        )
        .unwrap();

        assert_eq!(config.interfaces.len(), 1);
        assert!(config.interface("eth0").unwrap().enabled);
    }

    #[test]
    fn wifi_network_accepts_string_quality_and_unknown_encryption() {
        let net: WifiNetwork =
            serde_json::from_str(r#"{"SSID": "Cafe", "Quality": "67", "Encryption": "wep"}"#)
                .unwrap();

        assert_eq!(net.quality, 67);
        assert!(!net.requires_password());
    }

    #[test]
    fn sys_name_pattern() {
        let accepted = ["pi-4", "pi-4-b", "raspberrypi", "_pi_", "a-bc", "node_01", "a---"];
        for accepted in accepted {
            assert!(SysNameRequest::new(accepted).validate().is_ok(), "{accepted}");
        }
        let longest = "a".repeat(64);
        assert!(SysNameRequest::new(longest).validate().is_ok());

        for rejected in ["ab", "abc", "-pi4", "pi 4", "pi.local", "", "ä-bc"] {
            assert!(SysNameRequest::new(rejected).validate().is_err(), "{rejected}");
        }
        let too_long = "a".repeat(65);
        assert!(SysNameRequest::new(too_long).validate().is_err());
    }

    #[test]
    fn placeholder_entry_is_recognized() {
        let net: WifiNetwork =
            serde_json::from_str(r#"{"SSID": "--none--", "Quality": 0, "Encryption": "off"}"#)
                .unwrap();

        assert!(net.is_placeholder());
    }
}
