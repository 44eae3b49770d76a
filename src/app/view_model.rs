//! Responsible for transforming the `AppState` into a `UiState` view model.
//!
//! This module acts as a presentation layer: the page never sees tree nodes or
//! handles, only the rendered tree and a few display flags.

use serde::Serialize;

use super::state::AppState;
use super::tree_view::{render_tree, LOADING_HTML};
use crate::core::TreeNode;

/// A serializable representation of the application state for the UI.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    pub root_name: String,
    pub tree_html: String,
    pub has_tree: bool,
    pub is_building: bool,
    pub status_message: String,
    pub dark_mode: bool,
    pub tree_width_percent: f64,
    pub is_resizing: bool,
}

/// Creates the complete `UiState` from the current `AppState`.
pub fn generate_ui_state(state: &AppState) -> UiState {
    let tree_html = if state.is_building {
        LOADING_HTML.to_string()
    } else {
        render_tree(
            &state.tree,
            &state.expanded_dirs,
            state.previewed_file.as_deref(),
        )
    };

    UiState {
        root_name: state.root_name.clone(),
        tree_html,
        has_tree: !state.tree.is_empty(),
        is_building: state.is_building,
        status_message: state.status_message.clone(),
        dark_mode: state.dark_mode,
        tree_width_percent: state.layout.tree_width_percent,
        is_resizing: state.layout.is_resizing(),
    }
}

/// Status line shown after a build committed.
pub fn loaded_status_message(root_name: &str, tree: &[TreeNode]) -> String {
    let (folders, files) = TreeNode::count(tree);
    format!(
        "Loaded '{}': {} {}, {} {}.",
        root_name,
        folders,
        if folders == 1 { "folder" } else { "folders" },
        files,
        if files == 1 { "file" } else { "files" }
    )
}
