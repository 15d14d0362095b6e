//! Before/after summary shown on the review page.

use serde::{Deserialize, Serialize};

use crate::store::ConfigStore;

pub const NO_CHANGE: &str = "(no change)";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewLine {
    pub label: String,
    pub text: String,
    /// Section differs from the device snapshot
    pub changed: bool,
}

impl ReviewLine {
    fn new(label: impl Into<String>, text: impl Into<String>, changed: bool) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
            changed,
        }
    }
}

/// Compare the working copy against the snapshot.
///
/// Sections come in a fixed order: system name, Wifi, every interface in
/// `NetDevs` order, sharing.
pub fn diff(store: &ConfigStore) -> Vec<ReviewLine> {
    let working = store.working();
    let mut lines = Vec::new();

    if store.sys_name_changed() {
        lines.push(ReviewLine::new("New system Name: ", &working.sys_name, true));
    } else {
        lines.push(ReviewLine::new("System Name: ", NO_CHANGE, false));
    }

    let wpa = &working.wpa_info;
    if wpa.changed {
        let qualifier = if wpa.has_password() {
            "(with password)"
        } else {
            "(with no password)"
        };
        lines.push(ReviewLine::new(
            "Wifi: ",
            format!("{} {qualifier}", wpa.ssid),
            true,
        ));
    } else {
        lines.push(ReviewLine::new("Wifi: ", NO_CHANGE, false));
    }

    for (name, cfg) in working.interfaces_in_order() {
        let changed = store.interface_changed(name);
        let status = match (cfg.enabled, cfg.dhcp) {
            (false, _) => "disabled",
            (true, true) => "enabled, using DHCP",
            (true, false) => "enabled, static IP",
        };
        lines.push(ReviewLine::new(format!("{name}: "), status, changed));

        if cfg.uses_static_address() {
            for (key, value) in [
                ("IPAddr", &cfg.ip_addr),
                ("Router", &cfg.router),
                ("DNS1", &cfg.dns1),
                ("DNS2", &cfg.dns2),
            ] {
                lines.push(ReviewLine::new("", format!("{key}: {value}"), changed));
            }
        }
    }

    // No sharing settings are editable yet
    lines.push(ReviewLine::new("Sharing: ", NO_CHANGE, false));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::sample_config;

    fn texts(lines: &[ReviewLine]) -> Vec<(&str, &str)> {
        lines
            .iter()
            .map(|l| (l.label.as_str(), l.text.as_str()))
            .collect()
    }

    #[test]
    fn unchanged_store_reports_no_change() {
        let store = ConfigStore::from_snapshot(sample_config());

        let lines = diff(&store);

        assert_eq!(
            texts(&lines),
            vec![
                ("System Name: ", NO_CHANGE),
                ("Wifi: ", NO_CHANGE),
                ("eth0: ", "enabled, using DHCP"),
                ("wlan0: ", "enabled, static IP"),
                ("", "IPAddr: 192.168.1.31/24"),
                ("", "Router: 192.168.1.1"),
                ("", "DNS1: 1.0.0.1"),
                ("", "DNS2: 1.1.1.1"),
                ("Sharing: ", NO_CHANGE),
            ]
        );
        assert!(lines.iter().all(|l| !l.changed));
    }

    #[test]
    fn edited_sections_show_new_values() {
        let mut store = ConfigStore::from_snapshot(sample_config());
        {
            let working = store.working_mut();
            working.sys_name = "pi-4".to_string();
            working.wpa_info.ssid = "Home".to_string();
            working.wpa_info.password = String::new();
            working.wpa_info.changed = true;
            working.interface_mut("wlan0").unwrap().enabled = false;
        }

        let lines = diff(&store);

        assert_eq!(lines[0].label, "New system Name: ");
        assert_eq!(lines[0].text, "pi-4");
        assert_eq!(lines[1].text, "Home (with no password)");
        assert_eq!(lines[3].text, "disabled");
        assert!(lines[3].changed);
        assert!(!lines[2].changed);
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn renaming_back_reports_no_change() {
        let mut store = ConfigStore::from_snapshot(sample_config());
        store.working_mut().sys_name = "other".to_string();
        store.working_mut().sys_name = "raspberrypi".to_string();

        assert_eq!(diff(&store)[0].text, NO_CHANGE);
    }

    #[test]
    fn interfaces_follow_net_devs_order() {
        let mut config = sample_config();
        config.net_devs.reverse();
        let store = ConfigStore::from_snapshot(config);

        let labels: Vec<String> = diff(&store)
            .into_iter()
            .filter(|l| l.label.ends_with("0: "))
            .map(|l| l.label)
            .collect();

        assert_eq!(labels, vec!["wlan0: ", "eth0: "]);
    }
}
