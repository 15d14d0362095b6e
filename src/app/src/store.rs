//! Snapshot and working copy of the device configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Config, InterfaceConfig, InterfaceField};

/// Address of a single editable value in the configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigPath {
    SysName,
    WifiSsid,
    WifiPassword,
    WifiChanged,
    Interface(String, InterfaceField),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Unknown interface {0}.")]
    UnknownInterface(String),
    #[error("{path:?} does not hold a {expected} value")]
    TypeMismatch {
        path: ConfigPath,
        expected: &'static str,
    },
}

/// Device-confirmed snapshot (`original`) plus the operator's edits (`working`).
///
/// Both are owned values, so edits to the working copy never reach the
/// snapshot. Only [`ConfigStore::load_snapshot`] replaces the snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigStore {
    original: Config,
    working: Config,
}

impl ConfigStore {
    pub fn from_snapshot(snapshot: Config) -> Self {
        let mut store = Self::default();
        store.load_snapshot(snapshot);
        store
    }

    /// Replace both copies with a fresh device snapshot
    pub fn load_snapshot(&mut self, snapshot: Config) {
        self.working = snapshot.clone();
        self.working.wpa_info.changed = false;
        self.original = snapshot;
    }

    /// Take the configuration the device acknowledged for a commit as the
    /// new snapshot.
    ///
    /// `sent` is the working copy as it was transmitted. Edits made after the
    /// send stay in the working copy and show up as changes again.
    pub fn confirm_commit(&mut self, acknowledged: Config, sent: &Config) {
        let working = std::mem::take(&mut self.working);
        let edited_since_send = working != *sent;
        self.load_snapshot(acknowledged);

        if edited_since_send {
            let wifi_committed = working.wpa_info == sent.wpa_info;
            self.working = working;
            if wifi_committed {
                self.working.wpa_info.changed = false;
            }
        }
    }

    pub fn original(&self) -> &Config {
        &self.original
    }

    pub fn working(&self) -> &Config {
        &self.working
    }

    pub fn working_mut(&mut self) -> &mut Config {
        &mut self.working
    }

    pub fn working_interface_mut(
        &mut self,
        name: &str,
    ) -> Result<&mut InterfaceConfig, StoreError> {
        self.working
            .interface_mut(name)
            .ok_or_else(|| StoreError::UnknownInterface(name.to_string()))
    }

    pub fn get_field(&self, path: &ConfigPath) -> Result<FieldValue, StoreError> {
        read_field(&self.working, path)
    }

    pub fn set_field(&mut self, path: &ConfigPath, value: FieldValue) -> Result<(), StoreError> {
        let mismatch = |expected| StoreError::TypeMismatch {
            path: path.clone(),
            expected,
        };

        match (path, value) {
            (ConfigPath::SysName, FieldValue::Text(v)) => self.working.sys_name = v,
            (ConfigPath::WifiSsid, FieldValue::Text(v)) => self.working.wpa_info.ssid = v,
            (ConfigPath::WifiPassword, FieldValue::Text(v)) => self.working.wpa_info.password = v,
            (ConfigPath::WifiChanged, FieldValue::Flag(v)) => self.working.wpa_info.changed = v,
            (ConfigPath::Interface(name, field), value) => {
                let cfg = self.working_interface_mut(name)?;
                match (field, value) {
                    (InterfaceField::Enabled, FieldValue::Flag(v)) => cfg.enabled = v,
                    (InterfaceField::Dhcp, FieldValue::Flag(v)) => cfg.dhcp = v,
                    (InterfaceField::IpAddr, FieldValue::Text(v)) => cfg.ip_addr = v,
                    (InterfaceField::Router, FieldValue::Text(v)) => cfg.router = v,
                    (InterfaceField::Dns1, FieldValue::Text(v)) => cfg.dns1 = v,
                    (InterfaceField::Dns2, FieldValue::Text(v)) => cfg.dns2 = v,
                    (InterfaceField::Enabled | InterfaceField::Dhcp, _) => {
                        return Err(mismatch("flag"))
                    }
                    _ => return Err(mismatch("text")),
                }
            }
            (ConfigPath::WifiChanged, _) => return Err(mismatch("flag")),
            _ => return Err(mismatch("text")),
        }
        Ok(())
    }

    /// Structural comparison of one value between working copy and snapshot
    pub fn is_changed(&self, path: &ConfigPath) -> bool {
        match (read_field(&self.working, path), read_field(&self.original, path)) {
            (Ok(working), Ok(original)) => working != original,
            (Err(_), Err(_)) => false,
            _ => true,
        }
    }

    pub fn sys_name_changed(&self) -> bool {
        self.working.sys_name != self.original.sys_name
    }

    pub fn interface_changed(&self, name: &str) -> bool {
        self.working.interface(name) != self.original.interface(name)
    }

    /// Whether anything the review page shows differs from the snapshot
    pub fn has_changes(&self) -> bool {
        self.sys_name_changed()
            || self.working.wpa_info.changed
            || self
                .working
                .net_devs
                .iter()
                .any(|name| self.interface_changed(name))
    }
}

fn read_field(config: &Config, path: &ConfigPath) -> Result<FieldValue, StoreError> {
    let wpa = &config.wpa_info;
    let value = match path {
        ConfigPath::SysName => FieldValue::Text(config.sys_name.clone()),
        ConfigPath::WifiSsid => FieldValue::Text(wpa.ssid.clone()),
        ConfigPath::WifiPassword => FieldValue::Text(wpa.password.clone()),
        ConfigPath::WifiChanged => FieldValue::Flag(wpa.changed),
        ConfigPath::Interface(name, field) => {
            let cfg = config
                .interface(name)
                .ok_or_else(|| StoreError::UnknownInterface(name.clone()))?;
            match field {
                InterfaceField::Enabled => FieldValue::Flag(cfg.enabled),
                InterfaceField::Dhcp => FieldValue::Flag(cfg.dhcp),
                InterfaceField::IpAddr => FieldValue::Text(cfg.ip_addr.clone()),
                InterfaceField::Router => FieldValue::Text(cfg.router.clone()),
                InterfaceField::Dns1 => FieldValue::Text(cfg.dns1.clone()),
                InterfaceField::Dns2 => FieldValue::Text(cfg.dns2.clone()),
            }
        }
    };
    Ok(value)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::types::WpaInfo;

    pub(crate) fn sample_config() -> Config {
        let mut config = Config {
            sys_name: "raspberrypi".to_string(),
            net_devs: vec!["eth0".to_string(), "wlan0".to_string()],
            wpa_info: WpaInfo {
                valid: true,
                ssid: "Okima".to_string(),
                key_mgmt: "WPA-PSK".to_string(),
                password: "secret".to_string(),
                country: "US".to_string(),
                changed: true,
            },
            about: vec!["Model: Raspberry Pi 4".to_string()],
            ..Default::default()
        };
        config.interfaces.insert(
            "eth0".to_string(),
            InterfaceConfig {
                enabled: true,
                dhcp: true,
                ..Default::default()
            },
        );
        config.interfaces.insert(
            "wlan0".to_string(),
            InterfaceConfig {
                enabled: true,
                dhcp: false,
                ip_addr: "192.168.1.31/24".to_string(),
                router: "192.168.1.1".to_string(),
                dns1: "1.0.0.1".to_string(),
                dns2: "1.1.1.1".to_string(),
            },
        );
        config
    }

    fn ip_path(name: &str) -> ConfigPath {
        ConfigPath::Interface(name.to_string(), InterfaceField::IpAddr)
    }

    #[test]
    fn snapshot_load_resets_changed_flag_on_working_copy_only() {
        let store = ConfigStore::from_snapshot(sample_config());

        assert!(!store.working().wpa_info.changed);
        assert!(store.original().wpa_info.changed);
        assert!(!store.has_changes());
    }

    #[test]
    fn working_copy_does_not_alias_snapshot() {
        let mut store = ConfigStore::from_snapshot(sample_config());

        store
            .set_field(&ip_path("wlan0"), FieldValue::Text("10.0.0.2/8".to_string()))
            .unwrap();
        store.working_mut().net_devs.push("usb0".to_string());

        assert_eq!(
            store.original().interface("wlan0").unwrap().ip_addr,
            "192.168.1.31/24"
        );
        assert_eq!(store.original().net_devs.len(), 2);
        assert!(store.is_changed(&ip_path("wlan0")));
        assert!(!store.is_changed(&ip_path("eth0")));
    }

    #[test]
    fn setting_a_value_back_clears_change() {
        let mut store = ConfigStore::from_snapshot(sample_config());

        store
            .set_field(&ConfigPath::SysName, FieldValue::Text("pi-4".to_string()))
            .unwrap();
        assert!(store.is_changed(&ConfigPath::SysName));

        store
            .set_field(
                &ConfigPath::SysName,
                FieldValue::Text("raspberrypi".to_string()),
            )
            .unwrap();
        assert!(!store.is_changed(&ConfigPath::SysName));
    }

    #[test]
    fn get_field_reads_working_copy() {
        let mut store = ConfigStore::from_snapshot(sample_config());
        store.working_mut().sys_name = "edited".to_string();

        assert_eq!(
            store.get_field(&ConfigPath::SysName),
            Ok(FieldValue::Text("edited".to_string()))
        );
    }

    #[test]
    fn wrong_value_kind_is_rejected() {
        let mut store = ConfigStore::from_snapshot(sample_config());
        let before = store.working().clone();

        let result = store.set_field(
            &ConfigPath::Interface("eth0".to_string(), InterfaceField::Dhcp),
            FieldValue::Text("yes".to_string()),
        );

        assert!(matches!(result, Err(StoreError::TypeMismatch { .. })));
        assert_eq!(store.working(), &before);
    }

    #[test]
    fn confirmed_commit_becomes_snapshot() {
        let mut store = ConfigStore::from_snapshot(sample_config());
        store.working_mut().sys_name = "pi-4".to_string();
        let sent = store.working().clone();

        store.confirm_commit(sent.clone(), &sent);

        assert_eq!(store.original().sys_name, "pi-4");
        assert!(!store.has_changes());
    }

    #[test]
    fn edits_after_send_survive_confirmation() {
        let mut store = ConfigStore::from_snapshot(sample_config());
        store.working_mut().sys_name = "pi-4".to_string();
        store.working_mut().wpa_info.changed = true;
        let sent = store.working().clone();
        store.working_mut().sys_name = "late-edit".to_string();

        store.confirm_commit(sent.clone(), &sent);

        assert_eq!(store.original().sys_name, "pi-4");
        assert_eq!(store.working().sys_name, "late-edit");
        assert!(store.sys_name_changed());
        assert!(!store.working().wpa_info.changed);
    }

    #[test]
    fn unknown_interface_is_rejected() {
        let mut store = ConfigStore::from_snapshot(sample_config());

        let result = store.set_field(&ip_path("eth9"), FieldValue::Text(String::new()));

        assert_eq!(result, Err(StoreError::UnknownInterface("eth9".to_string())));
    }

    #[test]
    fn new_snapshot_supersedes_edits() {
        let mut store = ConfigStore::from_snapshot(sample_config());
        store.working_mut().sys_name = "edited".to_string();

        let mut next = sample_config();
        next.sys_name = "device".to_string();
        store.load_snapshot(next);

        assert_eq!(store.working().sys_name, "device");
        assert_eq!(store.original().sys_name, "device");
    }
}
