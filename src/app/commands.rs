//! Contains all the command handlers that are callable from the frontend via IPC.
//!
//! Each function in this module corresponds to a specific `IpcMessage::command`.
//! These handlers are responsible for interacting with the `AppState` and the `core`
//! logic, and for sending `UserEvent`s back to the UI.

use super::events::{ResizeMove, UserEvent};
use super::file_dialog::DialogService;
use super::helpers::{notify_state, with_state_and_notify};
use super::proxy::EventProxy;
use super::state::AppState;
use super::tasks::{start_build_on_path, start_preview};
use std::sync::{Arc, Mutex};

/// Sends the current state so a freshly loaded page can render.
pub fn initialize<P: EventProxy>(proxy: P, state: Arc<Mutex<AppState>>) {
    let state_guard = state
        .lock()
        .expect("Mutex was poisoned. This should not happen.");
    notify_state(&state_guard, &proxy);
}

/// Opens a folder dialog and builds the tree of the chosen folder.
///
/// Cancelling the dialog keeps the currently opened folder.
pub fn select_directory<P: EventProxy, D: DialogService + ?Sized>(
    dialog: &D,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    match dialog.pick_directory() {
        Some(path) => {
            tracing::info!("Folder selected: {:?}", path);
            start_build_on_path(path, proxy, state);
        }
        None => tracing::warn!("Folder selection cancelled."),
    }
}

/// Expands or collapses the folder whose slash path is the payload.
pub fn toggle_expansion<P: EventProxy>(
    payload: serde_json::Value,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    let Ok(path) = serde_json::from_value::<String>(payload.clone()) else {
        tracing::warn!("Invalid payload for toggleExpansion: {:?}", payload);
        return;
    };

    with_state_and_notify(&state, &proxy, |s| {
        let toggled = s.toggle_expansion(&path);
        if !toggled {
            tracing::warn!("toggleExpansion for unknown folder '{}'", path);
        }
        toggled
    });
}

/// Loads the preview of the file whose slash path is the payload.
pub fn load_file_preview<P: EventProxy>(
    payload: serde_json::Value,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    let Ok(path) = serde_json::from_value::<String>(payload.clone()) else {
        tracing::warn!("Invalid payload for loadFilePreview: {:?}", payload);
        return;
    };

    if !start_preview(path.clone(), proxy.clone(), state) {
        tracing::warn!("loadFilePreview for unknown file '{}'", path);
        proxy.send_event(UserEvent::ShowError(format!(
            "'{path}' is no longer part of the opened folder."
        )));
    }
}

pub fn toggle_dark_mode<P: EventProxy>(proxy: P, state: Arc<Mutex<AppState>>) {
    with_state_and_notify(&state, &proxy, |s| {
        s.dark_mode = !s.dark_mode;
        true
    });
}

pub fn resize_start<P: EventProxy>(proxy: P, state: Arc<Mutex<AppState>>) {
    with_state_and_notify(&state, &proxy, |s| {
        s.layout.press();
        true
    });
}

pub fn resize_move<P: EventProxy>(
    payload: serde_json::Value,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    let Ok(movement) = serde_json::from_value::<ResizeMove>(payload.clone()) else {
        tracing::warn!("Invalid payload for resizeMove: {:?}", payload);
        return;
    };

    with_state_and_notify(&state, &proxy, |s| {
        s.layout.drag(movement.pointer_x, movement.total_width)
    });
}

pub fn resize_end<P: EventProxy>(proxy: P, state: Arc<Mutex<AppState>>) {
    with_state_and_notify(&state, &proxy, |s| s.layout.release());
}
