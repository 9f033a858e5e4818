//! Per-file metadata snapshot used by every command.

use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::{OrganizeError, OrganizeResult};

/// A file (or directory) paired with the metadata a command decides on.
///
/// Entries are read fresh on each invocation and never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Full path to the entry.
    pub path: PathBuf,
    /// Final path component, lossily converted to UTF-8 for display.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Last modification time.
    pub modified: SystemTime,
    /// Whether the entry is a directory (symlinks are not followed).
    pub is_dir: bool,
}

impl FileEntry {
    /// Builds an entry from metadata that has already been read.
    ///
    /// Platforms that cannot report a modification time get the Unix epoch.
    pub fn from_metadata(path: PathBuf, metadata: &Metadata) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            name,
            size: metadata.len(),
            modified: metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
            is_dir: metadata.is_dir(),
            path,
        }
    }
}

/// Checks that `path` exists and is a directory.
///
/// Every command runs this before it touches anything, so a bad path never
/// causes a partial run.
pub fn validate_directory(path: &Path) -> OrganizeResult<()> {
    let metadata = std::fs::metadata(path).map_err(|e| OrganizeError::InvalidBasePath {
        path: path.to_path_buf(),
        source: e,
    })?;

    if !metadata.is_dir() {
        return Err(OrganizeError::NotADirectory(path.to_path_buf()));
    }

    Ok(())
}
