//! Loads the text shown in the preview pane for a selected file.

use super::error::CoreError;
use super::handle::FileHandle;
use crate::utils::file_detection::is_previewable;

/// Shown instead of content for files outside the text allow-list.
pub const UNSUPPORTED_MESSAGE: &str = "Preview is not supported for this file type.";
/// Shown instead of content when reading the file failed.
pub const UNREADABLE_MESSAGE: &str = "The file could not be read.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    Text(String),
    Unsupported,
    Unreadable,
}

impl Preview {
    /// The text to put in the preview pane.
    pub fn display_text(&self) -> &str {
        match self {
            Preview::Text(text) => text,
            Preview::Unsupported => UNSUPPORTED_MESSAGE,
            Preview::Unreadable => UNREADABLE_MESSAGE,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Preview::Text(_))
    }
}

/// Reads `file` for preview if `name` has a previewable extension.
///
/// Never fails: a read error is logged and turned into `Preview::Unreadable`.
pub async fn load_preview(file: &dyn FileHandle, name: &str) -> Preview {
    if !is_previewable(name) {
        tracing::debug!("Skipping preview of '{}': unsupported extension", name);
        return Preview::Unsupported;
    }

    match file.read_text().await {
        Ok(text) => {
            tracing::debug!("Loaded preview of '{}' ({} bytes)", name, text.len());
            Preview::Text(text)
        }
        Err(source) => {
            let err = CoreError::Read {
                path: name.to_string(),
                source,
            };
            tracing::error!("{}", err);
            Preview::Unreadable
        }
    }
}
