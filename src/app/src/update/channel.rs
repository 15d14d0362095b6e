use crux_core::{render::render, Command};
use serde_valid::Validate;

use crate::commands::channel::ChannelOutput;
use crate::events::{ChannelEvent, Event};
use crate::model::Model;
use crate::protocol::{self, ControlRequest, DeviceMessage, RequestType};
use crate::types::{Page, WizardSettings};
use crate::{ChannelCmd, Effect};

use super::wizard;

/// Validate the shell-supplied settings and open the control channel
pub fn handle_initialize(settings: WizardSettings, model: &mut Model) -> Command<Effect, Event> {
    if let Err(e) = settings.validate() {
        return model.set_error_and_render(format!("Invalid settings: {e}"));
    }

    model.settings = settings;
    model.page = Page::Connecting;
    Command::all([render(), connect(model)])
}

fn connect(model: &Model) -> Command<Effect, Event> {
    let url = model.settings.channel_url();
    log::debug!("connecting to {url}");
    ChannelCmd::connect(url)
        .build()
        .then_send(|output| Event::Channel(ChannelEvent::Output(output)))
}

/// Handle control channel events
pub fn handle(event: ChannelEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        ChannelEvent::MessageReceived(raw) => on_message(&raw, model),
        ChannelEvent::Disconnected => handle_disconnected(model),
        ChannelEvent::Output(output) => handle_output(output, model),
        ChannelEvent::SendFailed { kind, message } => {
            model.in_flight.remove(&kind);
            if kind == RequestType::SetConfig {
                model.abort_commit();
            }
            model.set_error_and_render(format!("Failed to send {kind}: {message}"))
        }
    }
}

fn handle_output(output: ChannelOutput, model: &mut Model) -> Command<Effect, Event> {
    match output {
        ChannelOutput::Connected => {
            log::debug!("connected to {}", model.settings.channel_url());
            model.is_connected = true;
            model.in_flight.clear();
            let bootstrap = send_request(ControlRequest::new(RequestType::GetConfig), model);
            Command::all([render(), bootstrap])
        }
        ChannelOutput::Sent => Command::done(),
        ChannelOutput::Error { message } => {
            model.set_error_and_render(format!("Connection error: {message}"))
        }
    }
}

fn handle_disconnected(model: &mut Model) -> Command<Effect, Event> {
    model.is_connected = false;
    model.in_flight.clear();
    model.abort_commit();
    model.set_error_and_render("Connection to device lost".to_string())
}

/// Encode and send a request unless one of the same type is still unanswered
pub fn send_request(request: ControlRequest, model: &mut Model) -> Command<Effect, Event> {
    let kind = request.kind;
    if model.in_flight.contains(&kind) {
        log::debug!("{kind} already in flight, not sent again");
        return Command::done();
    }

    let frame = match request.encode() {
        Ok(frame) => frame,
        Err(e) => return model.fail(e),
    };

    log::debug!("-> {frame}");
    model.in_flight.insert(kind);

    ChannelCmd::send(frame)
        .build()
        .then_send(move |output| match output {
            ChannelOutput::Error { message } => {
                Event::Channel(ChannelEvent::SendFailed { kind, message })
            }
            other => Event::Channel(ChannelEvent::Output(other)),
        })
}

fn on_message(raw: &str, model: &mut Model) -> Command<Effect, Event> {
    log::debug!("<- {raw}");

    let inbound = protocol::decode(raw, &model.settings.wifi_interface);
    if let Some(kind) = inbound.kind {
        model.in_flight.remove(&kind);
    }

    match inbound.message {
        Ok(DeviceMessage::Config(config)) => wizard::handle_config_snapshot(config, model),
        Ok(DeviceMessage::WifiList(list)) => wizard::handle_wifi_list(list, model),
        Ok(DeviceMessage::ConfigSaved(saved)) => wizard::handle_config_saved(saved, model),
        Err(e) => {
            if inbound.kind == Some(RequestType::SetConfig) {
                model.abort_commit();
            }
            model.fail(e)
        }
    }
}

