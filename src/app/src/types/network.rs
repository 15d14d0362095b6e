use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::config::InterfaceConfig;

/// Validate IPv4 address format
pub fn is_valid_ipv4(ip: &str) -> bool {
    let parts: Vec<&str> = ip.split('.').collect();
    if parts.len() != 4 {
        return false;
    }

    parts.iter().all(|part| {
        !part.is_empty()
            && part.chars().all(|c| c.is_ascii_digit())
            && part.parse::<u32>().map(|num| num <= 255).unwrap_or(false)
    })
}

/// Validate and parse a prefix length, accepts "/24" or "24"
pub fn parse_netmask(mask: &str) -> Option<u32> {
    let cleaned = mask.trim_start_matches('/');
    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    match cleaned.parse::<u32>() {
        Ok(prefix_len) if prefix_len <= 32 => Some(prefix_len),
        _ => None,
    }
}

/// Split a CIDR-form address (`192.168.1.31/24`) into address and prefix length
pub fn parse_cidr(cidr: &str) -> Option<(&str, u32)> {
    let (addr, mask) = cidr.split_once('/')?;
    if !is_valid_ipv4(addr) {
        return None;
    }
    parse_netmask(mask).map(|prefix_len| (addr, prefix_len))
}

/// Editable fields of an interface entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum InterfaceField {
    Enabled,
    Dhcp,
    IpAddr,
    Router,
    Dns1,
    Dns2,
}

impl InterfaceField {
    /// Wire name of the field, also the suffix of the rendering layer's input ids
    pub fn key(self) -> &'static str {
        match self {
            Self::Enabled => "Enabled",
            Self::Dhcp => "DHCP",
            Self::IpAddr => "IPAddr",
            Self::Router => "Router",
            Self::Dns1 => "DNS1",
            Self::Dns2 => "DNS2",
        }
    }

    /// Composite key `<interface>-<field>` addressing an input element
    pub fn element_id(self, interface: &str) -> String {
        format!("{interface}-{}", self.key())
    }
}

/// Static address input values of one interface as entered by the operator
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceFields {
    pub name: String,
    pub ip_addr: String,
    pub router: String,
    pub dns1: String,
    pub dns2: String,
}

impl InterfaceFields {
    pub fn apply_to(&self, cfg: &mut InterfaceConfig) {
        cfg.ip_addr = self.ip_addr.clone();
        cfg.router = self.router.clone();
        cfg.dns1 = self.dns1.clone();
        cfg.dns2 = self.dns2.clone();
    }
}

/// Check the static address fields of an interface before they are committed.
///
/// Disabled and DHCP interfaces are never validated. Errors are keyed by the
/// element id of the offending input.
pub fn validate_static_fields(name: &str, cfg: &InterfaceConfig) -> BTreeMap<String, String> {
    let mut errors = BTreeMap::new();

    if !cfg.uses_static_address() {
        return errors;
    }

    if parse_cidr(&cfg.ip_addr).is_none() {
        errors.insert(
            InterfaceField::IpAddr.element_id(name),
            "Invalid IPv4 address/mask".to_string(),
        );
    }

    if !is_valid_ipv4(&cfg.router) {
        errors.insert(
            InterfaceField::Router.element_id(name),
            "Invalid router address".to_string(),
        );
    }

    for (field, value) in [
        (InterfaceField::Dns1, &cfg.dns1),
        (InterfaceField::Dns2, &cfg.dns2),
    ] {
        if !value.is_empty() && !is_valid_ipv4(value) {
            errors.insert(field.element_id(name), "Invalid DNS server".to_string());
        }
    }

    errors
}
