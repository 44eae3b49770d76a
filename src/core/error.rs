//! Defines the custom error type for the `core` module.

use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for the `core` module.
///
/// This enum encapsulates all possible errors that can occur while building
/// a folder tree or reading a file for preview.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Listing the entries of a directory failed somewhere in the walk.
    ///
    /// `path` is the slash-joined location relative to the opened folder,
    /// empty for the folder itself.
    #[error("Failed to list directory '{path}': {source}")]
    Enumeration {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Reading the content of a file failed.
    #[error("Failed to read file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Represents a path that was expected to be a directory but was not.
    #[error("Path is not a valid directory: {0}")]
    NotADirectory(PathBuf),

    /// A newer folder selection started while this build was still running.
    #[error("Build was superseded by a newer folder selection")]
    Superseded,
}
