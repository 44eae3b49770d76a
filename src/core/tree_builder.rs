//! Builds a sorted folder tree from a directory handle.

use std::future::Future;
use std::pin::Pin;
use std::time::Instant;

use super::error::CoreError;
use super::generation::BuildTicket;
use super::handle::{DirectoryHandle, EntryKind};
use super::tree::{join_path, sort_nodes, TreeNode};

type BuildFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<TreeNode>, CoreError>> + Send + 'a>>;

/// Walks a directory handle and produces its complete tree.
///
/// Each folder is listed, its subfolders are built first, and only then is the
/// level sorted and the folder node created. A failed listing anywhere fails
/// the whole build; no partial tree is ever returned.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    ticket: Option<BuildTicket>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops the walk with `CoreError::Superseded` once `ticket` goes stale.
    pub fn with_ticket(ticket: BuildTicket) -> Self {
        Self {
            ticket: Some(ticket),
        }
    }

    pub async fn build(&self, root: &dyn DirectoryHandle) -> Result<Vec<TreeNode>, CoreError> {
        let started = Instant::now();
        tracing::info!("Building tree for '{}'", root.name());

        let nodes = self.read_directory(root, String::new()).await?;

        let (folders, files) = TreeNode::count(&nodes);
        tracing::info!(
            "Built tree for '{}': {} folders, {} files in {:?}",
            root.name(),
            folders,
            files,
            started.elapsed()
        );
        Ok(nodes)
    }

    fn read_directory<'a>(&'a self, dir: &'a dyn DirectoryHandle, path: String) -> BuildFuture<'a> {
        Box::pin(async move {
            self.ensure_current()?;

            let entries = dir.entries().await.map_err(|source| {
                tracing::warn!("Listing '{}' failed: {}", path, source);
                CoreError::Enumeration {
                    path: path.clone(),
                    source,
                }
            })?;

            let mut nodes = Vec::with_capacity(entries.len());
            for entry in entries {
                match entry.kind {
                    EntryKind::Directory(handle) => {
                        let child_path = join_path(&path, &entry.name);
                        let children = self.read_directory(handle.as_ref(), child_path).await?;
                        nodes.push(TreeNode::Folder {
                            name: entry.name,
                            children,
                            handle,
                        });
                    }
                    EntryKind::File(handle) => nodes.push(TreeNode::File {
                        name: entry.name,
                        handle,
                    }),
                }
            }

            sort_nodes(&mut nodes);
            Ok(nodes)
        })
    }

    fn ensure_current(&self) -> Result<(), CoreError> {
        match &self.ticket {
            Some(ticket) if !ticket.is_current() => {
                tracing::debug!("Build {} is stale, stopping walk", ticket.id());
                Err(CoreError::Superseded)
            }
            _ => Ok(()),
        }
    }
}

/// Builds the tree of `root` without a cancellation ticket.
pub async fn build_tree(root: &dyn DirectoryHandle) -> Result<Vec<TreeNode>, CoreError> {
    TreeBuilder::new().build(root).await
}
