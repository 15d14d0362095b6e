use serde::{Deserialize, Serialize};

use crate::commands::channel::ChannelOutput;
use crate::protocol::RequestType;
use crate::types::*;

/// Control channel events
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum ChannelEvent {
    /// Raw frame received on the WebSocket
    MessageReceived(String),
    /// Shell noticed the WebSocket closed
    Disconnected,

    // Result of a Connect/Send operation (internal event)
    #[serde(skip)]
    Output(ChannelOutput),
    /// Shell could not transmit a request (internal event)
    #[serde(skip)]
    SendFailed { kind: RequestType, message: String },
}

/// Page navigation and page-level operator input
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    GotoPage(Page),
    ChooseSsid { ssid: String },
    /// Sent by the shell when Enter is pressed in the password field
    SubmitPassword { password: String },
    CancelPassword,
    ChangeSysName { name: String },
    ApplyChanges,
}

/// Edits on the network interface page
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum NetworkEvent {
    ToggleEnable { interface: String },
    ToggleDhcp { interface: String },
    UpdateStaticFields(InterfaceFields),
    /// Values of every interface's inputs when the page is confirmed
    UpdateIf { interfaces: Vec<InterfaceFields> },
}

/// UI events
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum UiEvent {
    ClearError,
    ClearSuccess,
}

/// Events that can happen in the app
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum Event {
    Initialize(WizardSettings),
    Channel(ChannelEvent),
    Wizard(WizardEvent),
    Network(NetworkEvent),
    Ui(UiEvent),
}
