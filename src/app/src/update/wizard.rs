use std::collections::BTreeMap;

use crux_core::{render::render, Command};
use serde_valid::Validate;

use crate::error::ChannelError;
use crate::events::{Event, WizardEvent};
use crate::model::Model;
use crate::protocol::{ControlRequest, RequestType};
use crate::review;
use crate::store::{ConfigPath, ConfigStore, FieldValue};
use crate::types::*;
use crate::with_store;
use crate::Effect;

use super::channel::send_request;

/// Handle page navigation and page-level operator input
pub fn handle(event: WizardEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        WizardEvent::GotoPage(target) => {
            if model.page == Page::Epilog {
                log::debug!("ignoring navigation to {target:?} after the epilog");
                return Command::done();
            }
            goto_page(target, model)
        }
        WizardEvent::ChooseSsid { ssid } => choose_ssid(ssid, model),
        WizardEvent::SubmitPassword { password } => submit_password(password, model),
        WizardEvent::CancelPassword => {
            model.password_prompt = None;
            render()
        }
        WizardEvent::ChangeSysName { name } => change_sys_name(name, model),
        WizardEvent::ApplyChanges => apply_changes(model),
    }
}

/// Populate `target` and show it
pub fn goto_page(target: Page, model: &mut Model) -> Command<Effect, Event> {
    if !model.is_ready() && target != Page::Connecting {
        return model.fail(ChannelError::not_loaded());
    }

    log::debug!("page {:?} -> {target:?}", model.page);
    let populated = populate(target, model);
    model.page = target;
    Command::all([populated, render()])
}

fn populate(target: Page, model: &mut Model) -> Command<Effect, Event> {
    match target {
        Page::Toc => {
            model.wifi_list = None;
            model.password_prompt = None;
            model.scan_retries = 0;
            Command::done()
        }
        Page::Scanning => {
            model.wifi_list = None;
            model.password_prompt = None;
            model.scan_retries = 0;
            send_request(ControlRequest::new(RequestType::GetWifiList), model)
        }
        Page::Ssid => {
            model.password_prompt = None;
            Command::done()
        }
        Page::Review => {
            model.review = model.store.as_ref().map(review::diff).unwrap_or_default();
            Command::done()
        }
        Page::Connecting
        | Page::SysName
        | Page::Network
        | Page::Sharing
        | Page::About
        | Page::Epilog => Command::done(),
    }
}

/// A `GetConfig` answer: replace snapshot and working copy, then show the TOC
pub fn handle_config_snapshot(config: Config, model: &mut Model) -> Command<Effect, Event> {
    log::debug!(
        "configuration snapshot of {} with {} interface(s)",
        config.sys_name,
        config.interfaces.len()
    );

    match model.store.as_mut() {
        Some(store) => store.load_snapshot(config),
        None => model.store = Some(ConfigStore::from_snapshot(config)),
    }
    model.validation_errors.clear();
    model.commit_state = CommitState::Idle;
    model.pending_commit = None;
    goto_page(Page::Toc, model)
}

/// A `GetWifiList` answer
pub fn handle_wifi_list(
    list: Option<Vec<WifiNetwork>>,
    model: &mut Model,
) -> Command<Effect, Event> {
    if model.page != Page::Scanning {
        log::warn!("discarding wifi list received on {:?}", model.page);
        return Command::done();
    }

    let max_retries = model.settings.max_scan_retries;
    match list {
        Some(networks) => {
            log::debug!("scan found {} network(s)", networks.len());
            model.wifi_list = Some(networks);
            goto_page(Page::Ssid, model)
        }
        None if model.scan_retries < max_retries => {
            model.scan_retries += 1;
            log::warn!(
                "{}, scanning again ({}/{max_retries})",
                ChannelError::TransientEmptyResult,
                model.scan_retries
            );
            let rescan = send_request(ControlRequest::new(RequestType::GetWifiList), model);
            Command::all([rescan, render()])
        }
        None => {
            let attempts = model.scan_retries + 1;
            let back = goto_page(Page::Toc, model);
            Command::all([back, model.fail(ChannelError::ScanExhausted(attempts))])
        }
    }
}

fn choose_ssid(ssid: String, model: &mut Model) -> Command<Effect, Event> {
    if !model.is_ready() {
        return model.fail(ChannelError::not_loaded());
    }

    let network = model
        .wifi_list
        .as_ref()
        .and_then(|list| {
            list.iter()
                .find(|network| !network.is_placeholder() && network.ssid == ssid)
        })
        .cloned();

    match network {
        None => {
            let rescan = goto_page(Page::Scanning, model);
            let alert = model.fail(ChannelError::validation(format!("SSID {ssid} not in list.")));
            Command::all([rescan, alert])
        }
        Some(network) if network.requires_password() => {
            model.password_prompt = Some(network.ssid);
            render()
        }
        Some(network) => apply_wifi(network.ssid, String::new(), model),
    }
}

fn submit_password(password: String, model: &mut Model) -> Command<Effect, Event> {
    let Some(ssid) = model.password_prompt.take() else {
        return model.fail(ChannelError::validation("No Wifi network selected."));
    };
    apply_wifi(ssid, password, model)
}

fn apply_wifi(ssid: String, password: String, model: &mut Model) -> Command<Effect, Event> {
    with_store!(model, |store| {
        let written = store
            .set_field(&ConfigPath::WifiSsid, FieldValue::Text(ssid))
            .and_then(|()| store.set_field(&ConfigPath::WifiPassword, FieldValue::Text(password)))
            .and_then(|()| store.set_field(&ConfigPath::WifiChanged, FieldValue::Flag(true)));

        match written {
            Ok(()) => goto_page(Page::Toc, model),
            Err(e) => model.fail(e.into()),
        }
    })
}

fn change_sys_name(name: String, model: &mut Model) -> Command<Effect, Event> {
    if let Err(e) = SysNameRequest::new(name.as_str()).validate() {
        log::debug!("rejected system name {name:?}: {e}");
        return model.fail(ChannelError::validation(format!(
            "{name} is not a valid system name."
        )));
    }

    with_store!(model, |store| {
        match store.set_field(&ConfigPath::SysName, FieldValue::Text(name)) {
            Ok(()) => goto_page(Page::Toc, model),
            Err(e) => model.fail(e.into()),
        }
    })
}

fn apply_changes(model: &mut Model) -> Command<Effect, Event> {
    if model.page != Page::Review {
        return model.fail(ChannelError::validation(
            "Changes can only be applied from the review page.",
        ));
    }
    if model.commit_state == CommitState::Committing {
        log::debug!("commit already in progress");
        return Command::done();
    }

    let Some(store) = model.store.as_ref() else {
        return model.fail(ChannelError::not_loaded());
    };

    let errors: BTreeMap<String, String> = store
        .working()
        .interfaces_in_order()
        .flat_map(|(name, cfg)| validate_static_fields(name, cfg))
        .collect();

    if !errors.is_empty() {
        let count = errors.len();
        model.validation_errors = errors;
        return model.fail(ChannelError::validation(format!(
            "{count} network setting(s) are invalid. Correct them before applying."
        )));
    }

    let request = match ControlRequest::set_config(store.working()) {
        Ok(request) => request,
        Err(e) => return model.fail(e),
    };

    let sent = store.working().clone();
    model.validation_errors.clear();
    model.commit_state = CommitState::Committing;
    model.pending_commit = Some(sent);
    let commit = send_request(request, model);
    Command::all([commit, render()])
}

/// A `SetConfig` answer: the acknowledged configuration becomes the snapshot
pub fn handle_config_saved(saved: Option<Config>, model: &mut Model) -> Command<Effect, Event> {
    let Some(sent) = model.pending_commit.take() else {
        log::warn!("discarding SetConfig answer without an outstanding commit");
        return Command::done();
    };
    let Some(store) = model.store.as_mut() else {
        log::warn!("discarding SetConfig answer received before any snapshot");
        return Command::done();
    };

    let mut acknowledged = saved.unwrap_or_else(|| sent.clone());
    acknowledged.wpa_info.changed = false;
    store.confirm_commit(acknowledged, &sent);

    model.commit_state = CommitState::Committed;
    model.success_message = Some("Configuration saved".to_string());
    goto_page(Page::Epilog, model)
}
