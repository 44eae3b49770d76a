//! Handles backed by the local filesystem.

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::error::CoreError;
use super::handle::{DirectoryHandle, Entry, FileHandle};

/// A directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalDirectory {
    path: PathBuf,
    name: String,
}

impl LocalDirectory {
    /// Opens `path` as the root of a tree.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let path = path.into();
        match tokio::fs::metadata(&path).await {
            Ok(metadata) if metadata.is_dir() => {
                let name = display_name(&path);
                Ok(Self { path, name })
            }
            _ => Err(CoreError::NotADirectory(path)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DirectoryHandle for LocalDirectory {
    fn name(&self) -> &str {
        &self.name
    }

    async fn entries(&self) -> io::Result<Vec<Entry>> {
        let mut read_dir = tokio::fs::read_dir(&self.path).await?;
        let mut entries = Vec::new();

        while let Some(dir_entry) = read_dir.next_entry().await? {
            let name = dir_entry.file_name().to_string_lossy().into_owned();
            let path = dir_entry.path();
            // Symlinks are not followed, a link to a directory is listed as a file.
            let file_type = dir_entry.file_type().await?;

            if file_type.is_dir() {
                let handle = Arc::new(LocalDirectory {
                    path,
                    name: name.clone(),
                });
                entries.push(Entry::directory(name, handle));
            } else {
                entries.push(Entry::file(name, Arc::new(LocalFile { path })));
            }
        }

        Ok(entries)
    }
}

/// A file on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalFile {
    path: PathBuf,
}

impl LocalFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl FileHandle for LocalFile {
    async fn read_text(&self) -> io::Result<String> {
        let bytes = tokio::fs::read(&self.path).await?;
        // Invalid UTF-8 sequences become U+FFFD, like a browser's `File.text()`.
        Ok(match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        })
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::handle::EntryKind;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_open_rejects_files_and_missing_paths() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("plain.txt");
        fs::write(&file_path, "x").unwrap();

        assert!(matches!(
            LocalDirectory::open(&file_path).await,
            Err(CoreError::NotADirectory(_))
        ));
        assert!(matches!(
            LocalDirectory::open(dir.path().join("missing")).await,
            Err(CoreError::NotADirectory(_))
        ));
    }

    #[tokio::test]
    async fn test_entries_classifies_files_and_directories() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("README.md"), "# hi").unwrap();

        let root = LocalDirectory::open(dir.path()).await.unwrap();
        let mut entries = root.entries().await.unwrap();
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "README.md");
        assert!(matches!(entries[0].kind, EntryKind::File(_)));
        assert_eq!(entries[1].name, "src");
        assert!(matches!(entries[1].kind, EntryKind::Directory(_)));
    }

    #[tokio::test]
    async fn test_open_uses_last_path_component_as_name() {
        let dir = tempdir().unwrap();
        let project = dir.path().join("my_project");
        fs::create_dir(&project).unwrap();

        let root = LocalDirectory::open(&project).await.unwrap();
        assert_eq!(root.name(), "my_project");
        assert_eq!(root.path(), project.as_path());
    }

    #[tokio::test]
    async fn test_read_text_replaces_invalid_utf8() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mixed.txt");
        fs::write(&path, [b'o', b'k', 0xFF, b'!']).unwrap();

        let text = LocalFile::new(&path).read_text().await.unwrap();
        assert_eq!(text, "ok\u{FFFD}!");
    }

    #[tokio::test]
    async fn test_read_text_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let file = LocalFile::new(dir.path().join("gone.txt"));
        assert!(file.read_text().await.is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_entries_fails_without_permission() {
        use std::os::unix::fs::PermissionsExt;

        if crate::utils::test_helpers::running_as_root() {
            return;
        }

        let dir = tempdir().unwrap();
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).unwrap();
        let handle = LocalDirectory::open(&locked).await.unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let result = handle.entries().await;

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        assert!(result.is_err());
    }
}
