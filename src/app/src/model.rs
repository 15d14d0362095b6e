use std::collections::{BTreeMap, BTreeSet};

use crate::error::ChannelError;
use crate::protocol::RequestType;
use crate::review::ReviewLine;
use crate::store::ConfigStore;
use crate::types::*;

/// Application Model - the complete state of one wizard session
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Model {
    pub settings: WizardSettings,

    // Device state, `None` until the first snapshot arrived
    pub store: Option<ConfigStore>,

    // Wizard state
    pub page: Page,
    /// Last scan result, cleared whenever the table of contents is shown
    pub wifi_list: Option<Vec<WifiNetwork>>,
    /// SSID waiting for its password
    pub password_prompt: Option<String>,
    pub scan_retries: u32,
    pub review: Vec<ReviewLine>,
    pub commit_state: CommitState,
    /// Working copy as sent with the unanswered `SetConfig`
    pub pending_commit: Option<Config>,
    /// Per-input errors keyed by `<interface>-<field>`
    pub validation_errors: BTreeMap<String, String>,

    // Channel state
    pub is_connected: bool,
    /// Request types sent and not yet answered
    pub in_flight: BTreeSet<RequestType>,

    // UI state
    pub error_message: Option<String>,
    pub success_message: Option<String>,
}

impl Model {
    pub fn is_ready(&self) -> bool {
        self.store.is_some()
    }

    /// Set an error message shown to the operator
    pub fn set_error(&mut self, error: String) {
        log::error!("{error}");
        self.error_message = Some(error);
    }

    /// Set an error message and return a render command
    pub fn set_error_and_render(
        &mut self,
        error: String,
    ) -> crux_core::Command<crate::Effect, crate::events::Event> {
        self.set_error(error);
        crux_core::render::render()
    }

    /// Surface a typed error and re-render
    pub fn fail(
        &mut self,
        error: ChannelError,
    ) -> crux_core::Command<crate::Effect, crate::events::Event> {
        self.set_error_and_render(error.to_string())
    }

    /// The outstanding commit did not make it; edits stay in the working copy
    pub fn abort_commit(&mut self) {
        if self.commit_state == CommitState::Committing {
            self.commit_state = CommitState::Idle;
        }
        self.pending_commit = None;
    }
}
