//! The webview application: IPC dispatch, background tasks and the bridge
//! that turns `UserEvent`s into calls of the page's `window.*` functions.

pub mod commands;
pub mod events;
pub mod file_dialog;
pub mod helpers;
pub mod layout;
pub mod proxy;
pub mod state;
pub mod tasks;
pub mod tree_view;
pub mod view_model;

use std::sync::{Arc, Mutex};

use events::{IpcMessage, UserEvent};
use file_dialog::DialogService;
use proxy::EventProxy;
use state::AppState;

/// Parses an IPC message from the page and runs the matching command.
///
/// Malformed messages and unknown commands are logged and ignored.
pub fn handle_ipc_message<P: EventProxy, D: DialogService + ?Sized>(
    message: String,
    dialog: Arc<D>,
    proxy: P,
    state: Arc<Mutex<AppState>>,
) {
    let msg: IpcMessage = match serde_json::from_str(&message) {
        Ok(msg) => msg,
        Err(e) => {
            tracing::warn!("Failed to parse IPC message '{}': {}", message, e);
            return;
        }
    };

    tracing::debug!("IPC command: {}", msg.command);

    match msg.command.as_str() {
        "initialize" => commands::initialize(proxy, state),
        "selectDirectory" => commands::select_directory(dialog.as_ref(), proxy, state),
        "toggleExpansion" => commands::toggle_expansion(msg.payload, proxy, state),
        "loadFilePreview" => commands::load_file_preview(msg.payload, proxy, state),
        "toggleDarkMode" => commands::toggle_dark_mode(proxy, state),
        "resizeStart" => commands::resize_start(proxy, state),
        "resizeMove" => commands::resize_move(msg.payload, proxy, state),
        "resizeEnd" => commands::resize_end(proxy, state),
        other => tracing::warn!("Unknown IPC command: {}", other),
    }
}

/// Builds the script that delivers `event` to the page.
pub fn script_for_event(event: &UserEvent) -> Option<String> {
    let script = match event {
        UserEvent::StateUpdate(ui_state) => {
            format!("window.render({})", to_json(ui_state.as_ref())?)
        }
        UserEvent::ShowFilePreview {
            name,
            path,
            content,
            is_text,
        } => {
            let payload = serde_json::json!({
                "name": name,
                "path": path,
                "content": content,
                "isText": is_text,
            });
            // A delivered preview replaces any error still on screen.
            format!("window.clearError();window.showFilePreview({payload})")
        }
        UserEvent::ResetPreview => "window.resetPreview()".to_string(),
        UserEvent::ShowError(message) => format!("window.showError({})", to_json(message)?),
        UserEvent::DragStateChanged(active) => format!("window.setDragState({active})"),
    };
    Some(script)
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Option<String> {
    match serde_json::to_string(value) {
        Ok(json) => Some(json),
        Err(e) => {
            tracing::error!("Failed to serialize event payload: {}", e);
            None
        }
    }
}

/// Runs on the event loop thread and forwards `event` to the webview.
pub fn handle_user_event(event: UserEvent, webview: &wry::WebView) {
    let Some(script) = script_for_event(&event) else {
        return;
    };
    if let Err(e) = webview.evaluate_script(&script) {
        tracing::warn!("Failed to evaluate script in webview: {}", e);
    }
}
