//! An abstraction layer for native file dialogs to enable testing.

use std::path::PathBuf;

/// Defines the folder selection dialog.
/// This allows for a mock implementation during tests, avoiding the need
/// to interact with actual OS dialog windows.
pub trait DialogService: Send + Sync {
    /// Opens a dialog to select a single directory. `None` if the user cancelled.
    fn pick_directory(&self) -> Option<PathBuf>;
}

/// The production implementation that uses the `rfd` crate to show native OS dialogs.
pub struct NativeDialogService;

impl DialogService for NativeDialogService {
    fn pick_directory(&self) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .set_title("Open Folder")
            .pick_folder()
    }
}
