//! In-memory handles.
//!
//! These let the tree builder and the preview loader run without a real
//! filesystem, including directories that refuse to be listed and files that
//! refuse to be read.

use async_trait::async_trait;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::handle::{DirectoryHandle, Entry, FileHandle};

/// A directory whose entries are held in memory.
#[derive(Debug, Clone)]
pub struct MemoryDirectory {
    name: String,
    entries: Vec<Entry>,
    fail_listing: bool,
    list_count: Arc<AtomicUsize>,
}

impl MemoryDirectory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
            fail_listing: false,
            list_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Adds a text file.
    pub fn with_file(self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.with_file_handle(name, MemoryFile::new(content))
    }

    pub fn with_file_handle(mut self, name: impl Into<String>, file: MemoryFile) -> Self {
        self.entries.push(Entry::file(name, Arc::new(file)));
        self
    }

    /// Adds a subdirectory under its own name.
    pub fn with_dir(mut self, dir: MemoryDirectory) -> Self {
        let name = dir.name.clone();
        self.entries.push(Entry::directory(name, Arc::new(dir)));
        self
    }

    /// Adds a subdirectory listed under `name` instead of its own name.
    pub fn with_dir_named(mut self, name: impl Into<String>, dir: MemoryDirectory) -> Self {
        self.entries.push(Entry::directory(name, Arc::new(dir)));
        self
    }

    /// Makes every `entries` call fail with `PermissionDenied`.
    pub fn failing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    /// How many times this directory has been listed.
    pub fn list_count(&self) -> usize {
        self.list_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DirectoryHandle for MemoryDirectory {
    fn name(&self) -> &str {
        &self.name
    }

    async fn entries(&self) -> io::Result<Vec<Entry>> {
        self.list_count.fetch_add(1, Ordering::SeqCst);
        if self.fail_listing {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("listing '{}' is not permitted", self.name),
            ));
        }
        Ok(self.entries.clone())
    }
}

/// A file whose content is held in memory.
///
/// Clones share the read counter.
#[derive(Debug, Clone)]
pub struct MemoryFile {
    content: Option<String>,
    read_count: Arc<AtomicUsize>,
}

impl MemoryFile {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            read_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// A file whose every read fails.
    pub fn unreadable() -> Self {
        Self {
            content: None,
            read_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// How many reads were attempted.
    pub fn read_count(&self) -> usize {
        self.read_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FileHandle for MemoryFile {
    async fn read_text(&self) -> io::Result<String> {
        self.read_count.fetch_add(1, Ordering::SeqCst);
        self.content.clone().ok_or_else(|| {
            io::Error::new(io::ErrorKind::PermissionDenied, "file is not readable")
        })
    }
}
