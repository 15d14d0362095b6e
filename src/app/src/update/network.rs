use crux_core::{render::render, Command};

use crate::error::ChannelError;
use crate::events::{Event, NetworkEvent};
use crate::model::Model;
use crate::store::{ConfigPath, ConfigStore, FieldValue, StoreError};
use crate::types::{InterfaceField, InterfaceFields, Page};
use crate::Effect;

use super::wizard::goto_page;

/// Handle edits on the network interface page
pub fn handle(event: NetworkEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        NetworkEvent::ToggleEnable { interface } => {
            toggle(interface, InterfaceField::Enabled, model)
        }
        NetworkEvent::ToggleDhcp { interface } => toggle(interface, InterfaceField::Dhcp, model),
        NetworkEvent::UpdateStaticFields(fields) => {
            let name = fields.name.clone();
            edit_interface(&name, model, |store| {
                fields.apply_to(store.working_interface_mut(&fields.name)?);
                Ok(())
            })
        }
        NetworkEvent::UpdateIf { interfaces } => update_interfaces(interfaces, model),
    }
}

fn toggle(name: String, field: InterfaceField, model: &mut Model) -> Command<Effect, Event> {
    let path = ConfigPath::Interface(name.clone(), field);
    edit_interface(&name, model, |store| match store.get_field(&path)? {
        FieldValue::Flag(value) => store.set_field(&path, FieldValue::Flag(!value)),
        FieldValue::Text(_) => Err(StoreError::TypeMismatch {
            path: path.clone(),
            expected: "flag",
        }),
    })
}

/// Apply one edit to the working copy and drop the now stale errors of that interface
fn edit_interface<F>(name: &str, model: &mut Model, edit: F) -> Command<Effect, Event>
where
    F: FnOnce(&mut ConfigStore) -> Result<(), StoreError>,
{
    let Some(store) = model.store.as_mut() else {
        return model.fail(ChannelError::not_loaded());
    };

    if let Err(e) = edit(store) {
        return model.fail(e.into());
    }

    let prefix = format!("{name}-");
    model
        .validation_errors
        .retain(|key, _| !key.starts_with(&prefix));
    render()
}

/// Write the static fields of every known interface, then return to the TOC
fn update_interfaces(entries: Vec<InterfaceFields>, model: &mut Model) -> Command<Effect, Event> {
    let Some(store) = model.store.as_mut() else {
        return model.fail(ChannelError::not_loaded());
    };

    let net_devs = store.working().net_devs.clone();
    for entry in entries.iter().filter(|entry| !net_devs.contains(&entry.name)) {
        log::warn!("ignoring fields of unknown interface {}", entry.name);
    }

    for name in &net_devs {
        let Some(fields) = entries.iter().find(|entry| &entry.name == name) else {
            continue;
        };
        match store.working_interface_mut(name) {
            Ok(cfg) => fields.apply_to(cfg),
            Err(e) => log::warn!("{e}"),
        }
    }

    model.validation_errors.clear();
    goto_page(Page::Toc, model)
}
