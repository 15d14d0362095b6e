pub mod commands;
pub mod error;
pub mod events;
pub mod macros;
pub mod model;
pub mod protocol;
pub mod review;
pub mod store;
pub mod types;
pub mod update;
pub mod view;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

use crux_core::Command;

// Re-export core types
pub use crate::{
    commands::channel::{ChannelOperation, ChannelOutput},
    error::ChannelError,
    events::{ChannelEvent, Event, NetworkEvent, UiEvent, WizardEvent},
    model::Model,
    protocol::{ControlRequest, RequestType},
    review::ReviewLine,
    store::{ConfigPath, ConfigStore, FieldValue, StoreError},
    types::*,
    view::{
        AboutLine, InterfaceView, PageView, SsidView, StaticFieldsView, ViewModel, WifiRow,
    },
};

#[crux_macros::effect(typegen)]
pub enum Effect {
    Render(crux_core::render::RenderOperation),
    Channel(ChannelOperation),
}

pub type ChannelCmd = crate::commands::channel::Channel<Effect, Event>;

/// The Core application
#[derive(Default)]
pub struct App;

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Effect = Effect;

    fn update(&self, event: Self::Event, model: &mut Self::Model) -> Command<Effect, Event> {
        update::update(event, model)
    }

    fn view(&self, model: &Self::Model) -> Self::ViewModel {
        view::view(model)
    }
}
