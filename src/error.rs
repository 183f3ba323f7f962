//! Error types for file operations
//!
//! The permission gate collapses "file does not exist" and "no read
//! permission" into the single `AccessDenied` outcome; everything that
//! goes wrong after the gate surfaces as `Io` with the cause attached.

use std::io;
use std::path::{Path, PathBuf};

/// Errors from file utilities and the tail reader
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    /// The permission gate rejected the path before any I/O
    #[error("read access denied: {}", .path.display())]
    AccessDenied { path: PathBuf },

    /// Open, seek, or read failed after the gate passed
    #[error("i/o failure on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Glob pattern error
    #[error("glob pattern error: {0}")]
    Pattern(#[from] globset::Error),
}

impl FileError {
    pub(crate) fn denied(path: &Path) -> Self {
        FileError::AccessDenied {
            path: path.to_path_buf(),
        }
    }

    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        FileError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
