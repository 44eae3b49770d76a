//! The in-memory folder tree.

use std::cmp::Ordering;
use std::sync::Arc;

use super::handle::{DirectoryHandle, FileHandle};
use crate::utils::collation::locale_cmp;

/// A folder or a file in a built tree.
///
/// Handles are shared references to capabilities granted for the opened
/// folder; they do not take part in equality.
#[derive(Debug, Clone)]
pub enum TreeNode {
    Folder {
        name: String,
        children: Vec<TreeNode>,
        handle: Arc<dyn DirectoryHandle>,
    },
    File {
        name: String,
        handle: Arc<dyn FileHandle>,
    },
}

impl TreeNode {
    pub fn name(&self) -> &str {
        match self {
            TreeNode::Folder { name, .. } | TreeNode::File { name, .. } => name,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, TreeNode::Folder { .. })
    }

    /// The children of a folder; empty for a file.
    pub fn children(&self) -> &[TreeNode] {
        match self {
            TreeNode::Folder { children, .. } => children,
            TreeNode::File { .. } => &[],
        }
    }

    pub fn file_handle(&self) -> Option<&Arc<dyn FileHandle>> {
        match self {
            TreeNode::File { handle, .. } => Some(handle),
            TreeNode::Folder { .. } => None,
        }
    }

    /// Display order: folders first, then locale order by name.
    pub fn display_cmp(&self, other: &TreeNode) -> Ordering {
        match (self.is_folder(), other.is_folder()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => locale_cmp(self.name(), other.name()),
        }
    }

    /// Resolves a slash-separated path like `"src/app/main.rs"`.
    pub fn find<'a>(nodes: &'a [TreeNode], path: &str) -> Option<&'a TreeNode> {
        let mut level = nodes;
        let mut found = None;
        for segment in path.split('/') {
            let node = level.iter().find(|node| node.name() == segment)?;
            level = node.children();
            found = Some(node);
        }
        found
    }

    /// Counts `(folders, files)` in the whole forest.
    pub fn count(nodes: &[TreeNode]) -> (usize, usize) {
        nodes.iter().fold((0, 0), |(folders, files), node| match node {
            TreeNode::Folder { children, .. } => {
                let (sub_folders, sub_files) = Self::count(children);
                (folders + 1 + sub_folders, files + sub_files)
            }
            TreeNode::File { .. } => (folders, files + 1),
        })
    }

    /// Slash paths of every folder, parents before children.
    pub fn folder_paths(nodes: &[TreeNode]) -> Vec<String> {
        let mut paths = Vec::new();
        collect_folder_paths(nodes, "", &mut paths);
        paths
    }
}

/// Sorts one level of siblings into display order.
pub fn sort_nodes(nodes: &mut [TreeNode]) {
    nodes.sort_by(TreeNode::display_cmp);
}

/// Joins a parent path and a child name with `/`.
pub fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}

fn collect_folder_paths(nodes: &[TreeNode], parent: &str, paths: &mut Vec<String>) {
    for node in nodes {
        if let TreeNode::Folder { name, children, .. } = node {
            let path = join_path(parent, name);
            paths.push(path.clone());
            collect_folder_paths(children, &path, paths);
        }
    }
}

impl PartialEq for TreeNode {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                TreeNode::Folder { name, children, .. },
                TreeNode::Folder {
                    name: other_name,
                    children: other_children,
                    ..
                },
            ) => name == other_name && children == other_children,
            (TreeNode::File { name, .. }, TreeNode::File { name: other_name, .. }) => {
                name == other_name
            }
            _ => false,
        }
    }
}

impl Eq for TreeNode {}
