mod channel;
mod network;
mod ui;
mod wizard;

use crux_core::Command;

use crate::events::Event;
use crate::model::Model;
use crate::Effect;

/// Main update dispatcher - routes events to domain-specific handlers
pub fn update(event: Event, model: &mut Model) -> Command<Effect, Event> {
    match event {
        // Initialization
        Event::Initialize(settings) => channel::handle_initialize(settings, model),

        // Control channel domain
        Event::Channel(channel_event) => channel::handle(channel_event, model),

        // Wizard navigation domain
        Event::Wizard(wizard_event) => wizard::handle(wizard_event, model),

        // Network interface domain
        Event::Network(network_event) => network::handle(network_event, model),

        // UI actions domain
        Event::Ui(ui_event) => ui::handle(ui_event, model),
    }
}
