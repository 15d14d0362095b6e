//! WebAssembly FFI bindings for the Crux Core
//!
//! The browser shell owns the control channel WebSocket. It forwards every
//! inbound frame as a `ChannelEvent::MessageReceived` event through
//! [`process_event`] and answers `Channel` effects through [`handle_response`].

use lazy_static::lazy_static;
use wasm_bindgen::prelude::wasm_bindgen;

use crux_core::{
    bridge::{Bridge, EffectId},
    Core,
};

use crate::App;

lazy_static! {
    static ref CORE: Bridge<App> = Bridge::new(Core::new());
}

/// Initialize the WASM module and set up logging
///
/// This runs automatically when the WASM module is loaded.
#[wasm_bindgen(start)]
pub fn init_wasm() {
    console_log::init_with_level(log::Level::Debug).expect("Failed to initialize logger");
}

/// Process an event from JavaScript
///
/// Takes a bincode-serialized Event and returns bincode-serialized Effects.
#[wasm_bindgen]
pub fn process_event(event_bytes: &[u8]) -> Vec<u8> {
    let mut effects = Vec::new();
    if let Err(e) = CORE.update(event_bytes, &mut effects) {
        log::error!("failed to process event: {e}");
        effects.clear();
    }
    effects
}

/// Get the current view model
///
/// Returns a bincode-serialized ViewModel.
#[wasm_bindgen]
pub fn view() -> Vec<u8> {
    let mut view = Vec::new();
    if let Err(e) = CORE.view(&mut view) {
        log::error!("failed to serialize view model: {e}");
        view.clear();
    }
    view
}

/// Handle the shell's answer to a `Channel` effect
///
/// Takes an effect ID and a bincode-serialized `ChannelOutput`.
/// Returns bincode-serialized Effects that should be processed.
#[wasm_bindgen]
pub fn handle_response(id: u32, response_bytes: &[u8]) -> Vec<u8> {
    let mut effects = Vec::new();
    if let Err(e) = CORE.resolve(EffectId(id), response_bytes, &mut effects) {
        log::error!("failed to resolve effect {id}: {e}");
        effects.clear();
    }
    effects
}
