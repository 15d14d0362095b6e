use serde::{Deserialize, Serialize};
use serde_valid::Validate;

/// Port the device's configuration daemon listens on
pub const DEFAULT_CHANNEL_PORT: u16 = 2021;

/// Interface whose scan list is taken from `GetWifiList` responses
pub const DEFAULT_WIFI_INTERFACE: &str = "wlan0";

/// Upper bound for automatic re-requests of an empty Wifi scan
pub const DEFAULT_MAX_SCAN_RETRIES: u32 = 5;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChannelScheme {
    #[default]
    Ws,
    Wss,
}

impl ChannelScheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ws => "ws",
            Self::Wss => "wss",
        }
    }
}

/// Settings handed to the core by the shell on startup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct WizardSettings {
    /// Host name the page was loaded from
    #[validate(min_length = 1)]
    pub host: String,
    #[validate(minimum = 1)]
    pub port: u16,
    pub scheme: ChannelScheme,
    #[validate(min_length = 1)]
    pub wifi_interface: String,
    #[validate(minimum = 1)]
    #[validate(maximum = 50)]
    pub max_scan_retries: u32,
}

impl Default for WizardSettings {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: DEFAULT_CHANNEL_PORT,
            scheme: ChannelScheme::default(),
            wifi_interface: DEFAULT_WIFI_INTERFACE.to_string(),
            max_scan_retries: DEFAULT_MAX_SCAN_RETRIES,
        }
    }
}

impl WizardSettings {
    pub fn for_host(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Default::default()
        }
    }

    /// Address of the control channel
    pub fn channel_url(&self) -> String {
        format!("{}://{}:{}", self.scheme.as_str(), self.host, self.port)
    }
}
