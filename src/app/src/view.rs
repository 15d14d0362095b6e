//! View model derived from the wizard state.
//!
//! The shell renders exactly one page at a time; `content` carries the data of
//! the page in `page` and nothing else.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::Model;
use crate::review::ReviewLine;
use crate::store::ConfigStore;
use crate::types::*;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel {
    pub page: Page,
    pub is_connected: bool,
    /// System name as confirmed by the device
    pub sys_name: String,
    pub has_changes: bool,
    pub error_message: Option<String>,
    pub success_message: Option<String>,
    pub validation_errors: BTreeMap<String, String>,
    pub commit_state: CommitState,
    pub content: PageView,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum PageView {
    #[default]
    Connecting,
    Toc {
        has_changes: bool,
    },
    Scanning {
        attempt: u32,
    },
    Ssid(SsidView),
    SysName {
        current: String,
    },
    Network {
        interfaces: Vec<InterfaceView>,
    },
    Sharing,
    About {
        lines: Vec<AboutLine>,
    },
    Review {
        lines: Vec<ReviewLine>,
        committing: bool,
    },
    Epilog {
        committed: bool,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SsidView {
    /// Network the device is configured for, e.g. `Okima (with password)`
    pub current_ssid: String,
    pub networks: Vec<WifiRow>,
    /// SSID waiting for its password
    pub password_prompt: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WifiRow {
    pub ssid: String,
    pub quality: u32,
    pub password_required: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceView {
    pub name: String,
    pub enabled: bool,
    /// `None` while the interface is disabled
    pub static_fields: Option<StaticFieldsView>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StaticFieldsView {
    pub dhcp: bool,
    /// Static inputs are read-only while DHCP is on
    pub editable: bool,
    pub ip_addr: String,
    pub router: String,
    pub dns1: String,
    pub dns2: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AboutLine {
    pub label: String,
    pub value: String,
}

impl AboutLine {
    /// Split at the first `": "`; lines without one become a bare value
    pub fn parse(line: &str) -> Self {
        match line.split_once(": ") {
            Some((label, value)) => Self {
                label: format!("{label}: "),
                value: value.to_string(),
            },
            None => Self {
                label: String::new(),
                value: line.to_string(),
            },
        }
    }
}

pub fn view(model: &Model) -> ViewModel {
    let store = model.store.as_ref();

    ViewModel {
        page: model.page,
        is_connected: model.is_connected,
        sys_name: store
            .map(|s| s.original().sys_name.clone())
            .unwrap_or_default(),
        has_changes: store.is_some_and(ConfigStore::has_changes),
        error_message: model.error_message.clone(),
        success_message: model.success_message.clone(),
        validation_errors: model.validation_errors.clone(),
        commit_state: model.commit_state,
        content: page_view(model, store),
    }
}

fn page_view(model: &Model, store: Option<&ConfigStore>) -> PageView {
    let Some(store) = store else {
        return PageView::Connecting;
    };

    match model.page {
        Page::Connecting => PageView::Connecting,
        Page::Toc => PageView::Toc {
            has_changes: store.has_changes(),
        },
        Page::Scanning => PageView::Scanning {
            attempt: model.scan_retries + 1,
        },
        Page::Ssid => PageView::Ssid(ssid_view(model, store)),
        Page::SysName => PageView::SysName {
            current: store.working().sys_name.clone(),
        },
        Page::Network => PageView::Network {
            interfaces: store
                .working()
                .interfaces_in_order()
                .map(|(name, cfg)| interface_view(name, cfg))
                .collect(),
        },
        Page::Sharing => PageView::Sharing,
        Page::About => PageView::About {
            lines: store
                .working()
                .about
                .iter()
                .map(|line| AboutLine::parse(line))
                .collect(),
        },
        Page::Review => PageView::Review {
            lines: model.review.clone(),
            committing: model.commit_state == CommitState::Committing,
        },
        Page::Epilog => PageView::Epilog {
            committed: model.commit_state == CommitState::Committed,
        },
    }
}

fn ssid_view(model: &Model, store: &ConfigStore) -> SsidView {
    let wpa = &store.original().wpa_info;
    let current_ssid = if wpa.has_password() {
        format!("{} (with password)", wpa.ssid)
    } else {
        format!("{} (with no password)", wpa.ssid)
    };

    let networks = model
        .wifi_list
        .iter()
        .flatten()
        .filter(|network| !network.is_placeholder())
        .map(|network| WifiRow {
            ssid: network.ssid.clone(),
            quality: network.quality,
            password_required: network.requires_password(),
        })
        .collect();

    SsidView {
        current_ssid,
        networks,
        password_prompt: model.password_prompt.clone(),
    }
}

fn interface_view(name: &str, cfg: &InterfaceConfig) -> InterfaceView {
    InterfaceView {
        name: name.to_string(),
        enabled: cfg.enabled,
        static_fields: cfg.enabled.then(|| StaticFieldsView {
            dhcp: cfg.dhcp,
            editable: !cfg.dhcp,
            ip_addr: cfg.ip_addr.clone(),
            router: cfg.router.clone(),
            dns1: cfg.dns1.clone(),
            dns2: cfg.dns2.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::sample_config;

    fn ready_model(page: Page) -> Model {
        Model {
            store: Some(ConfigStore::from_snapshot(sample_config())),
            page,
            ..Default::default()
        }
    }

    #[test]
    fn about_lines_split_at_first_separator() {
        assert_eq!(
            AboutLine::parse("Model: Raspberry Pi 4: rev 1.2"),
            AboutLine {
                label: "Model: ".to_string(),
                value: "Raspberry Pi 4: rev 1.2".to_string(),
            }
        );
        assert_eq!(AboutLine::parse("plain").label, "");
    }

    #[test]
    fn without_snapshot_every_page_shows_connecting() {
        let model = Model {
            page: Page::Network,
            ..Default::default()
        };
        assert_eq!(view(&model).content, PageView::Connecting);
    }

    #[test]
    fn ssid_page_hides_placeholder_and_marks_encrypted_networks() {
        let mut model = ready_model(Page::Ssid);
        model.wifi_list = Some(vec![
            WifiNetwork {
                ssid: "Home".to_string(),
                quality: 70,
                encryption: Encryption::On,
            },
            WifiNetwork {
                ssid: NO_NETWORK_SSID.to_string(),
                quality: 0,
                encryption: Encryption::Off,
            },
        ]);

        let PageView::Ssid(ssid) = view(&model).content else {
            panic!("expected ssid page");
        };
        assert_eq!(ssid.current_ssid, "Okima (with password)");
        assert_eq!(
            ssid.networks,
            vec![WifiRow {
                ssid: "Home".to_string(),
                quality: 70,
                password_required: true,
            }]
        );
    }

    #[test]
    fn network_page_makes_dhcp_fields_read_only_and_hides_disabled() {
        let mut model = ready_model(Page::Network);
        if let Some(store) = model.store.as_mut() {
            store.working_mut().interface_mut("wlan0").unwrap().enabled = false;
        }

        let PageView::Network { interfaces } = view(&model).content else {
            panic!("expected network page");
        };
        let eth0 = &interfaces[0];
        assert_eq!(eth0.name, "eth0");
        assert!(!eth0.static_fields.as_ref().unwrap().editable);
        assert_eq!(interfaces[1].static_fields, None);
    }
}
