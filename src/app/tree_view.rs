//! Renders the folder tree into the HTML shown in the tree panel.
//!
//! Every row carries its slash path in `data-path` so the page can send it
//! back with `toggleExpansion` or `loadFilePreview`. Children are only
//! emitted for expanded folders.

use std::collections::HashSet;
use std::fmt::Write;

use crate::core::tree::{join_path, TreeNode};

const FOLDER_ICON: &str = "📁";
const FOLDER_OPEN_ICON: &str = "📂";
const FILE_ICON: &str = "📄";

/// Shown in place of the tree while a folder is being read. Has no clickable rows.
pub const LOADING_HTML: &str = r#"<div class="loading">Loading...</div>"#;

pub fn render_tree(
    nodes: &[TreeNode],
    expanded_dirs: &HashSet<String>,
    previewed_file: Option<&str>,
) -> String {
    let mut html = String::new();
    render_level(nodes, "", expanded_dirs, previewed_file, &mut html);
    html
}

fn render_level(
    nodes: &[TreeNode],
    parent: &str,
    expanded_dirs: &HashSet<String>,
    previewed_file: Option<&str>,
    html: &mut String,
) {
    html.push_str("<div class=\"level\">");
    for node in nodes {
        let path = join_path(parent, node.name());
        let escaped_path = escape_html(&path);
        let escaped_name = escape_html(node.name());

        match node {
            TreeNode::Folder { children, .. } => {
                let is_open = expanded_dirs.contains(&path);
                let (wrapper_class, icon) = if is_open {
                    ("node open", FOLDER_OPEN_ICON)
                } else {
                    ("node", FOLDER_ICON)
                };
                let _ = write!(
                    html,
                    "<div class=\"{wrapper_class}\"><div class=\"folder\" data-kind=\"folder\" \
                     data-path=\"{escaped_path}\"><span class=\"icon\">{icon}</span>\
                     <span class=\"name\">{escaped_name}</span></div>"
                );
                if is_open {
                    html.push_str("<div class=\"children\">");
                    render_level(children, &path, expanded_dirs, previewed_file, html);
                    html.push_str("</div>");
                }
                html.push_str("</div>");
            }
            TreeNode::File { .. } => {
                let class = if previewed_file == Some(path.as_str()) {
                    "file selected"
                } else {
                    "file"
                };
                let _ = write!(
                    html,
                    "<div class=\"{class}\" data-kind=\"file\" data-path=\"{escaped_path}\">\
                     <span class=\"icon\">{FILE_ICON}</span>\
                     <span class=\"name\">{escaped_name}</span></div>"
                );
            }
        }
    }
    html.push_str("</div>");
}

/// Escapes text for use in HTML content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
