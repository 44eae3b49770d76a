//! Defines the event and message structures for communication between the backend and frontend.

use serde::Deserialize;

use super::view_model::UiState;

/// Events sent from the Rust backend to the WebView (UI thread).
///
/// Each variant corresponds to a specific JavaScript function (`window.*`) that will be called in the frontend.
#[derive(Debug, Clone, PartialEq)]
pub enum UserEvent {
    /// A complete state update to re-render the UI.
    StateUpdate(Box<UiState>),
    /// Content for the file preview panel.
    ShowFilePreview {
        name: String,
        path: String,
        content: String,
        /// `false` when `content` is one of the fixed sentinel messages.
        is_text: bool,
    },
    /// Puts the preview panel back to its placeholder.
    ResetPreview,
    /// An error message to be displayed to the user.
    ShowError(String),
    /// Indicates that a file is being dragged over the window.
    DragStateChanged(bool),
}

/// A message received from the WebView via the IPC channel.
#[derive(Deserialize, Debug)]
pub struct IpcMessage {
    /// The name of the command to execute.
    pub command: String,
    /// The payload associated with the command, as a JSON value.
    #[serde(default)]
    pub payload: serde_json::Value,
}

/// Pointer position reported while the resizer is dragged.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResizeMove {
    pub pointer_x: f64,
    pub total_width: f64,
}
