//! Capability handles for directories and files.
//!
//! A handle is issued by whatever granted access to a folder (a picker dialog,
//! a drop onto the window, a test). The tree only keeps shared references to
//! them and never tries to re-acquire one on its own.

use async_trait::async_trait;
use std::fmt;
use std::io;
use std::sync::Arc;

/// A directory the application was granted read access to.
#[async_trait]
pub trait DirectoryHandle: Send + Sync + fmt::Debug {
    /// The display name of this directory.
    fn name(&self) -> &str;

    /// Lists the direct children of this directory, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory can no longer be listed, for example
    /// because it was removed or the permission was revoked.
    async fn entries(&self) -> io::Result<Vec<Entry>>;
}

/// A file the application was granted read access to.
#[async_trait]
pub trait FileHandle: Send + Sync + fmt::Debug {
    /// Reads the whole file as text.
    async fn read_text(&self) -> io::Result<String>;
}

/// What kind of capability an entry grants.
#[derive(Debug, Clone)]
pub enum EntryKind {
    Directory(Arc<dyn DirectoryHandle>),
    File(Arc<dyn FileHandle>),
}

/// A single child of a directory.
#[derive(Debug, Clone)]
pub struct Entry {
    pub name: String,
    pub kind: EntryKind,
}

impl Entry {
    pub fn directory(name: impl Into<String>, handle: Arc<dyn DirectoryHandle>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Directory(handle),
        }
    }

    pub fn file(name: impl Into<String>, handle: Arc<dyn FileHandle>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File(handle),
        }
    }
}
