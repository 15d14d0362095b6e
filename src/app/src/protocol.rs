//! Message schema of the device control channel.
//!
//! Requests are `{"Type", "Arg1"?, "Arg2"?, "Arg3"?}`, responses are
//! `{"Type", "Error", "State"}`. There are no correlation ids: a response is
//! matched to its request by `Type` alone.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::ChannelError;
use crate::types::{Config, WifiNetwork};

/// Value of `Error` on every successful response
pub const SUCCESS_SENTINEL: &str = "No error.";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RequestType {
    GetConfig,
    GetWifiList,
    SetConfig,
}

impl RequestType {
    pub const ALL: [RequestType; 3] = [Self::GetConfig, Self::GetWifiList, Self::SetConfig];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::GetConfig => "GetConfig",
            Self::GetWifiList => "GetWifiList",
            Self::SetConfig => "SetConfig",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ControlRequest {
    #[serde(rename = "Type")]
    pub kind: RequestType,
    #[serde(rename = "Arg1", default, skip_serializing_if = "Option::is_none")]
    pub arg1: Option<String>,
    #[serde(rename = "Arg2", default, skip_serializing_if = "Option::is_none")]
    pub arg2: Option<String>,
    #[serde(rename = "Arg3", default, skip_serializing_if = "Option::is_none")]
    pub arg3: Option<String>,
}

impl ControlRequest {
    pub fn new(kind: RequestType) -> Self {
        Self {
            kind,
            arg1: None,
            arg2: None,
            arg3: None,
        }
    }

    /// Fill the next free argument slot. Arguments past the third are dropped.
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        let arg = arg.into();
        match (&self.arg1, &self.arg2, &self.arg3) {
            (None, _, _) => self.arg1 = Some(arg),
            (Some(_), None, _) => self.arg2 = Some(arg),
            (Some(_), Some(_), None) => self.arg3 = Some(arg),
            _ => log::warn!("{} takes at most three arguments", self.kind),
        }
        self
    }

    /// `SetConfig` carrying the working copy as JSON in `Arg1`
    pub fn set_config(config: &Config) -> Result<Self, ChannelError> {
        let json = serde_json::to_string(config)
            .map_err(|e| ChannelError::Malformed(format!("cannot encode config: {e}")))?;
        Ok(Self::new(RequestType::SetConfig).with_arg(json))
    }

    pub fn encode(&self) -> Result<String, ChannelError> {
        serde_json::to_string(self)
            .map_err(|e| ChannelError::Malformed(format!("cannot encode {}: {e}", self.kind)))
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ControlResponse {
    #[serde(rename = "Type", default)]
    pub kind: String,
    #[serde(rename = "Error", default)]
    pub error: String,
    #[serde(rename = "State", default)]
    pub state: Value,
}

/// Successfully decoded payload of a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceMessage {
    Config(Config),
    /// `None` when the device left out the list for the Wifi interface
    WifiList(Option<Vec<WifiNetwork>>),
    /// `None` when the device acknowledged without echoing the stored config
    ConfigSaved(Option<Config>),
}

/// A decoded inbound frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inbound {
    /// Known request type the frame answers, if the frame could be read that far
    pub kind: Option<RequestType>,
    pub message: Result<DeviceMessage, ChannelError>,
}

impl Inbound {
    fn failed(kind: Option<RequestType>, error: ChannelError) -> Self {
        Self {
            kind,
            message: Err(error),
        }
    }
}

/// Decode a raw frame. The error sentinel is checked before the type so a
/// failed exchange is reported even when its type is unknown.
pub fn decode(raw: &str, wifi_interface: &str) -> Inbound {
    let response: ControlResponse = match serde_json::from_str(raw) {
        Ok(response) => response,
        Err(e) => return Inbound::failed(None, ChannelError::Malformed(e.to_string())),
    };

    let kind = RequestType::parse(&response.kind);

    if response.error != SUCCESS_SENTINEL {
        return Inbound::failed(kind, ChannelError::Protocol(response.error));
    }

    let Some(kind) = kind else {
        return Inbound::failed(None, ChannelError::UnexpectedMessage(response.kind));
    };

    let message = match kind {
        RequestType::GetConfig => serde_json::from_value::<Config>(response.state)
            .map(DeviceMessage::Config)
            .map_err(|e| ChannelError::Malformed(format!("GetConfig: {e}"))),
        RequestType::GetWifiList => decode_wifi_list(response.state, wifi_interface),
        RequestType::SetConfig => match response.state {
            Value::Null => Ok(DeviceMessage::ConfigSaved(None)),
            state => serde_json::from_value::<Config>(state)
                .map(|cfg| DeviceMessage::ConfigSaved(Some(cfg)))
                .map_err(|e| ChannelError::Malformed(format!("SetConfig: {e}"))),
        },
    };

    Inbound {
        kind: Some(kind),
        message,
    }
}

fn decode_wifi_list(state: Value, wifi_interface: &str) -> Result<DeviceMessage, ChannelError> {
    let list = match state {
        Value::Object(mut by_interface) => by_interface.remove(wifi_interface),
        _ => None,
    };

    match list {
        None | Some(Value::Null) => Ok(DeviceMessage::WifiList(None)),
        Some(list) => serde_json::from_value::<Vec<WifiNetwork>>(list)
            .map(|networks| DeviceMessage::WifiList(Some(networks)))
            .map_err(|e| ChannelError::Malformed(format!("GetWifiList: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Encryption;

    #[test]
    fn request_without_args_omits_them() {
        let json = ControlRequest::new(RequestType::GetConfig).encode().unwrap();
        assert_eq!(json, r#"{"Type":"GetConfig"}"#);
    }

    #[test]
    fn args_fill_slots_in_order() {
        let request = ControlRequest::new(RequestType::SetConfig)
            .with_arg("a")
            .with_arg("b");

        assert_eq!(request.arg1.as_deref(), Some("a"));
        assert_eq!(request.arg2.as_deref(), Some("b"));
        assert_eq!(request.arg3, None);
    }

    #[test]
    fn protocol_error_is_reported_with_its_type() {
        let inbound = decode(
            r#"{"Type": "GetWifiList", "Error": "iwlist failed", "State": null}"#,
            "wlan0",
        );

        assert_eq!(inbound.kind, Some(RequestType::GetWifiList));
        assert_eq!(
            inbound.message,
            Err(ChannelError::Protocol("iwlist failed".to_string()))
        );
    }

    #[test]
    fn unknown_type_is_unexpected() {
        let inbound = decode(r#"{"Type": "Reboot", "Error": "No error.", "State": {}}"#, "wlan0");

        assert_eq!(inbound.kind, None);
        assert_eq!(
            inbound.message,
            Err(ChannelError::UnexpectedMessage("Reboot".to_string()))
        );
    }

    #[test]
    fn invalid_json_is_malformed() {
        let inbound = decode("not json", "wlan0");
        assert!(matches!(inbound.message, Err(ChannelError::Malformed(_))));
    }

    #[test]
    fn wifi_list_is_taken_from_wifi_interface() {
        let inbound = decode(
            r#"{"Type": "GetWifiList", "Error": "No error.", "State": {"wlan0": [
                {"SSID": "Home", "Quality": 80, "Encryption": "on"}
            ]}}"#,
            "wlan0",
        );

        let Ok(DeviceMessage::WifiList(Some(list))) = inbound.message else {
            panic!("expected wifi list");
        };
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].encryption, Encryption::On);
    }

    #[test]
    fn missing_wifi_list_decodes_as_empty_result() {
        let inbound = decode(
            r#"{"Type": "GetWifiList", "Error": "No error.", "State": {}}"#,
            "wlan0",
        );
        assert_eq!(inbound.message, Ok(DeviceMessage::WifiList(None)));
    }

    #[test]
    fn set_config_without_state_is_plain_acknowledgement() {
        let inbound = decode(r#"{"Type": "SetConfig", "Error": "No error."}"#, "wlan0");
        assert_eq!(inbound.message, Ok(DeviceMessage::ConfigSaved(None)));
    }
}
