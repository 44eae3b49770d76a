/// Extensions whose files are shown as text in the preview pane.
pub const PREVIEW_EXTENSIONS: &[&str] = &[
    "txt", "md", "mymd", "json", "js", "css", "html", "log", "py", "cpp", "cs",
];

/// Returns the lowercase extension used to decide previewability.
///
/// This is the text after the last `.`; a name without any dot is its own
/// extension, so a file called `LOG` counts as a log file.
pub fn preview_extension(name: &str) -> String {
    name.rsplit('.').next().unwrap_or(name).to_lowercase()
}

/// Determines if a file with this name can be previewed as text.
pub fn is_previewable(name: &str) -> bool {
    let ext = preview_extension(name);
    PREVIEW_EXTENSIONS.contains(&ext.as_str())
}
