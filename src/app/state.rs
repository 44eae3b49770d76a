//! Defines the central, mutable state of the application.

use crate::app::layout::PanelLayout;
use crate::config::AppConfig;
use crate::core::{BuildGeneration, TreeNode};
use std::collections::HashSet;
use tokio::task::JoinHandle;

pub const READY_MESSAGE: &str = "Open a folder to browse its files.";

/// Holds the complete, mutable state of the application.
///
/// This struct is wrapped in an `Arc<Mutex<...>>` to allow for safe, shared access
/// from different threads (e.g., the main event loop, IPC handlers, and async tasks).
pub struct AppState {
    /// The application's configuration settings.
    pub config: AppConfig,
    /// Display name of the opened folder, empty if none is open.
    pub root_name: String,
    /// The tree of the opened folder. Replaced as a whole by every build.
    pub tree: Vec<TreeNode>,
    /// Slash paths of the folders that are expanded in the tree panel.
    pub expanded_dirs: HashSet<String>,
    /// Slash path of the file shown in the preview pane.
    pub previewed_file: Option<String>,
    /// `true` while a tree build is running.
    pub is_building: bool,
    pub status_message: String,
    pub dark_mode: bool,
    pub layout: PanelLayout,
    /// Issues a ticket per build; only the newest build may commit its tree.
    pub build_generation: BuildGeneration,
    /// Issues a ticket per preview request; only the newest one is shown.
    pub preview_generation: BuildGeneration,
    /// A handle to the currently running build task, allowing it to be aborted.
    pub build_task: Option<JoinHandle<()>>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            dark_mode: config.dark_mode,
            layout: PanelLayout::new(config.tree_width_percent),
            config,
            root_name: String::new(),
            tree: Vec::new(),
            expanded_dirs: HashSet::new(),
            previewed_file: None,
            is_building: false,
            status_message: READY_MESSAGE.to_string(),
            build_generation: BuildGeneration::new(),
            preview_generation: BuildGeneration::new(),
            build_task: None,
        }
    }

    /// Stops the running build, if any. Its result can no longer be committed.
    pub fn cancel_current_build(&mut self) {
        self.build_generation.invalidate();
        if let Some(handle) = self.build_task.take() {
            tracing::info!("Aborting running tree build.");
            handle.abort();
        }
        self.is_building = false;
    }

    /// Drops everything that belongs to the opened folder.
    pub fn reset_folder_state(&mut self) {
        self.cancel_current_build();
        self.preview_generation.invalidate();
        self.root_name.clear();
        self.tree.clear();
        self.expanded_dirs.clear();
        self.previewed_file = None;
        self.status_message = READY_MESSAGE.to_string();
    }

    /// Expands or collapses a folder. Returns `false` for unknown paths.
    pub fn toggle_expansion(&mut self, path: &str) -> bool {
        match TreeNode::find(&self.tree, path) {
            Some(node) if node.is_folder() => {
                if !self.expanded_dirs.remove(path) {
                    self.expanded_dirs.insert(path.to_string());
                }
                true
            }
            _ => false,
        }
    }
}

impl Default for AppState {
    /// Creates a default `AppState` instance, loading the configuration from disk.
    fn default() -> Self {
        Self::new(AppConfig::load().unwrap_or_default())
    }
}
