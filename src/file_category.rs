//! Categorization functions that pick a destination folder for a file.
//!
//! Every function here is pure: the same name, size or timestamp always yields
//! the same folder name. The traversal engine in [`crate::file_organizer`] calls
//! them through a [`Categorizer`].
//!
//! # Examples
//!
//! ```
//! use simonsays::file_category::{SizeBucket, type_folder};
//!
//! assert_eq!(type_folder("report.pdf"), "pdf");
//! assert_eq!(type_folder("README"), "other");
//! assert_eq!(SizeBucket::for_size(2 * 1024 * 1024), SizeBucket::Medium);
//! ```
use chrono::{DateTime, Local};
use std::ffi::{OsStr, OsString};
use std::time::SystemTime;

use crate::file_entry::FileEntry;

/// Files strictly smaller than this are `small` (1 MiB).
pub const SMALL_THRESHOLD: u64 = 1024 * 1024;

/// Files strictly smaller than this, and not small, are `medium` (10 MiB).
pub const MEDIUM_THRESHOLD: u64 = 10 * 1024 * 1024;

/// Folder used by type sorting for files without an extension.
pub const OTHER_CATEGORY: &str = "other";

/// Size bucket a file falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeBucket {
    /// Under 1 MiB.
    Small,
    /// From 1 MiB up to, but not including, 10 MiB.
    Medium,
    /// 10 MiB and above.
    Large,
}

impl SizeBucket {
    /// Picks the bucket for a size in bytes.
    ///
    /// # Examples
    ///
    /// ```
    /// use simonsays::file_category::SizeBucket;
    ///
    /// assert_eq!(SizeBucket::for_size(1_048_575), SizeBucket::Small);
    /// assert_eq!(SizeBucket::for_size(1_048_576), SizeBucket::Medium);
    /// assert_eq!(SizeBucket::for_size(10_485_760), SizeBucket::Large);
    /// ```
    pub fn for_size(size: u64) -> Self {
        if size < SMALL_THRESHOLD {
            SizeBucket::Small
        } else if size < MEDIUM_THRESHOLD {
            SizeBucket::Medium
        } else {
            SizeBucket::Large
        }
    }

    /// Returns the directory name for this bucket.
    pub fn dir_name(&self) -> &'static str {
        match self {
            SizeBucket::Small => "small",
            SizeBucket::Medium => "medium",
            SizeBucket::Large => "large",
        }
    }
}

/// Splits a file name into its base and its extension.
///
/// The extension starts at the last `.` and keeps it; the base is everything
/// before. A name without a `.` has an empty extension. Dot-files are not
/// special: `.bashrc` has an empty base and extension `.bashrc`. The split
/// works on the raw name, so bytes that are not valid UTF-8 survive it.
///
/// # Examples
///
/// ```
/// use simonsays::file_category::split_extension;
/// use std::ffi::OsStr;
///
/// assert_eq!(
///     split_extension("archive.tar.gz"),
///     (OsStr::new("archive.tar"), OsStr::new(".gz"))
/// );
/// assert_eq!(split_extension("Makefile"), (OsStr::new("Makefile"), OsStr::new("")));
/// ```
pub fn split_extension<S: AsRef<OsStr> + ?Sized>(file_name: &S) -> (&OsStr, &OsStr) {
    let name = file_name.as_ref();
    match name.as_encoded_bytes().iter().rposition(|&b| b == b'.') {
        Some(idx) => split_at_dot(name, idx),
        None => (name, OsStr::new("")),
    }
}

/// Splits `name` at byte offset `idx`, which holds an ASCII `.`.
#[cfg(unix)]
fn split_at_dot(name: &OsStr, idx: usize) -> (&OsStr, &OsStr) {
    use std::os::unix::ffi::OsStrExt;

    let (base, ext) = name.as_bytes().split_at(idx);
    (OsStr::from_bytes(base), OsStr::from_bytes(ext))
}

#[cfg(not(unix))]
fn split_at_dot(name: &OsStr, idx: usize) -> (&OsStr, &OsStr) {
    match name.to_str() {
        Some(name) => {
            let (base, ext) = name.split_at(idx);
            (OsStr::new(base), OsStr::new(ext))
        }
        None => (name, OsStr::new("")),
    }
}

/// Folder name for a modification time: local date as `DDMMYYYY`.
pub fn date_folder(modified: SystemTime) -> String {
    let local: DateTime<Local> = modified.into();
    local.format("%d%m%Y").to_string()
}

/// Folder name for a file name: its extension without the dot, or `other`.
///
/// Case is preserved, so `a.TXT` and `a.txt` land in different folders.
pub fn type_folder<S: AsRef<OsStr> + ?Sized>(file_name: &S) -> OsString {
    let (_, ext) = split_extension(file_name);
    if ext.len() <= 1 {
        return OsString::from(OTHER_CATEGORY);
    }
    let (_, ext) = split_at_dot(ext, 1);
    ext.to_os_string()
}

/// Strategy used by the traversal engine to compute a category key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Categorizer {
    /// Modification date, `DDMMYYYY`.
    Date,
    /// File extension, `other` when there is none.
    Type,
    /// `small`, `medium` or `large`.
    Size,
}

impl Categorizer {
    /// Computes the category key (destination folder name) for an entry.
    ///
    /// Type keys come from the raw file name on disk, not the display name.
    pub fn category_for(&self, entry: &FileEntry) -> OsString {
        match self {
            Categorizer::Date => date_folder(entry.modified).into(),
            Categorizer::Type => type_folder(entry.path.file_name().unwrap_or_default()),
            Categorizer::Size => SizeBucket::for_size(entry.size).dir_name().into(),
        }
    }
}
