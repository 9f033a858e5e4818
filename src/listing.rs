//! Sorted file listings.
//!
//! Collects [`FileEntry`] values for the files in a directory (optionally the
//! whole tree), sorts them by name, size or modification time and renders one
//! report line per file.

use std::cmp::Ordering;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;
use std::time::SystemTime;

use chrono::{DateTime, Local, SecondsFormat};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{OrganizeError, OrganizeResult};
use crate::file_entry::{FileEntry, validate_directory};

/// Key a listing is sorted by, ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Lexicographic by file name.
    #[default]
    Name,
    /// Numeric by size in bytes.
    Size,
    /// Chronological by modification time.
    Time,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Size => "size",
            SortKey::Time => "time",
        }
    }

    fn compare(&self, a: &FileEntry, b: &FileEntry) -> Ordering {
        match self {
            SortKey::Name => a.name.cmp(&b.name),
            SortKey::Size => a.size.cmp(&b.size),
            SortKey::Time => a.modified.cmp(&b.modified),
        }
    }
}

impl FromStr for SortKey {
    type Err = OrganizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortKey::Name),
            "size" => Ok(SortKey::Size),
            "time" => Ok(SortKey::Time),
            other => Err(OrganizeError::UnknownSortOption(other.to_string())),
        }
    }
}

/// Options for a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListOptions {
    pub sort: SortKey,
    pub recursive: bool,
}

/// Collects the files in `dir`, skipping every directory.
///
/// Without `recursive` only the immediate children are read; with it the
/// whole tree is walked. Symlinks are not followed.
pub fn collect_entries(dir: &Path, recursive: bool) -> OrganizeResult<Vec<FileEntry>> {
    let mut entries = Vec::new();

    if recursive {
        for entry in WalkDir::new(dir) {
            let entry = entry.map_err(|e| OrganizeError::WalkFailed {
                root: dir.to_path_buf(),
                source: e,
            })?;
            if entry.file_type().is_dir() {
                continue;
            }
            let metadata = entry.metadata().map_err(|e| OrganizeError::MetadataFailed {
                path: entry.path().to_path_buf(),
                source: io::Error::from(e),
            })?;
            entries.push(FileEntry::from_metadata(entry.into_path(), &metadata));
        }
    } else {
        let read_dir_err = |e: io::Error| OrganizeError::ReadDirFailed {
            path: dir.to_path_buf(),
            source: e,
        };
        for entry in fs::read_dir(dir).map_err(read_dir_err)? {
            let entry = entry.map_err(read_dir_err)?;
            let metadata = entry.metadata().map_err(|e| OrganizeError::MetadataFailed {
                path: entry.path(),
                source: e,
            })?;
            let file = FileEntry::from_metadata(entry.path(), &metadata);
            if !file.is_dir {
                entries.push(file);
            }
        }
    }

    Ok(entries)
}

/// Sorts entries ascending by `key`. Ties keep no particular order.
pub fn sort_entries(entries: &mut [FileEntry], key: SortKey) {
    entries.sort_unstable_by(|a, b| key.compare(a, b));
}

/// Formats a timestamp as RFC 3339 in the local zone, e.g.
/// `2024-03-07T09:30:00+01:00` (`Z` when the offset is zero).
pub fn format_timestamp(time: SystemTime) -> String {
    let local: DateTime<Local> = time.into();
    local.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Renders the report line for one entry.
pub fn format_entry(entry: &FileEntry) -> String {
    format!(
        "- {} (Size: {} bytes, Modified: {})",
        entry.name,
        entry.size,
        format_timestamp(entry.modified)
    )
}

/// Lists the files in `dir` sorted by `options.sort`.
///
/// Writes a `Files:` header, then one line per file. Nothing is written if
/// collecting the entries fails.
///
/// # Examples
///
/// ```no_run
/// use simonsays::listing::{ListOptions, SortKey, list_files};
/// use std::path::Path;
///
/// let options = ListOptions { sort: SortKey::Size, recursive: true };
/// let mut out = std::io::stdout();
/// list_files(Path::new("/path/to/dir"), &options, &mut out).unwrap();
/// ```
pub fn list_files(
    dir: &Path,
    options: &ListOptions,
    out: &mut dyn Write,
) -> OrganizeResult<Vec<FileEntry>> {
    validate_directory(dir)?;

    let mut entries = collect_entries(dir, options.recursive)?;
    debug!(
        dir = %dir.display(),
        recursive = options.recursive,
        files = entries.len(),
        "collected entries"
    );
    sort_entries(&mut entries, options.sort);

    writeln!(out, "Files:")?;
    for entry in &entries {
        writeln!(out, "{}", format_entry(entry))?;
    }

    info!(listed = entries.len(), sort = options.sort.as_str(), "listing complete");
    Ok(entries)
}
