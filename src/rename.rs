//! Bulk renaming of the files in one directory from a template pattern.
//!
//! A template may contain `{index}`, `{name}` and `{ext}`. They are replaced
//! one after another, in that order, as plain text substitutions:
//!
//! ```
//! use simonsays::rename::RenameTemplate;
//!
//! let template = RenameTemplate::new("img-{index}{ext}");
//! assert_eq!(template.resolve(5, "photo.jpg"), "img-5.jpg");
//!
//! // No `.` after substitution: the original extension is appended.
//! let template = RenameTemplate::new("{name}-copy");
//! assert_eq!(template.resolve(1, "report.pdf"), "report-copy.pdf");
//! ```

use std::ffi::{OsStr, OsString};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{OrganizeError, OrganizeResult};
use crate::file_category::split_extension;
use crate::file_entry::validate_directory;

const INDEX_TOKEN: &str = "{index}";
const NAME_TOKEN: &str = "{name}";
const EXT_TOKEN: &str = "{ext}";

/// A rename pattern with `{index}`, `{name}` and `{ext}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameTemplate {
    pattern: String,
}

impl RenameTemplate {
    /// Wraps a pattern. Any text is accepted; unknown braces are kept as-is.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    /// The pattern as given.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Computes the new file name for `file_name` at position `index`.
    ///
    /// Substitution runs `{index}`, then `{name}`, then `{ext}`, each over the
    /// output of the previous step. If the result has no `.` anywhere, the
    /// original extension is appended. Base and extension are substituted
    /// from the raw file name, so non-UTF-8 bytes are carried over unchanged.
    pub fn resolve<S: AsRef<OsStr> + ?Sized>(&self, index: i64, file_name: &S) -> OsString {
        let (base, ext) = split_extension(file_name);

        let resolved = self.pattern.replace(INDEX_TOKEN, &index.to_string());
        let resolved = replace_token(OsStr::new(&resolved), NAME_TOKEN, base);
        let mut resolved = replace_token(&resolved, EXT_TOKEN, ext);

        if !resolved.as_encoded_bytes().contains(&b'.') {
            resolved.push(ext);
        }
        resolved
    }
}

/// Replaces every occurrence of `token` in `haystack` with `with`, left to right.
#[cfg(unix)]
fn replace_token(haystack: &OsStr, token: &str, with: &OsStr) -> OsString {
    use std::os::unix::ffi::{OsStrExt, OsStringExt};

    let token = token.as_bytes();
    let mut rest = haystack.as_bytes();
    let mut replaced = Vec::with_capacity(rest.len());
    while let Some(pos) = rest.windows(token.len()).position(|w| w == token) {
        replaced.extend_from_slice(&rest[..pos]);
        replaced.extend_from_slice(with.as_bytes());
        rest = &rest[pos + token.len()..];
    }
    replaced.extend_from_slice(rest);
    OsString::from_vec(replaced)
}

#[cfg(not(unix))]
fn replace_token(haystack: &OsStr, token: &str, with: &OsStr) -> OsString {
    haystack
        .to_string_lossy()
        .replace(token, &with.to_string_lossy())
        .into()
}

/// Options for a bulk rename run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameOptions {
    /// Report what would change without renaming anything.
    pub dry_run: bool,
    /// Value substituted for `{index}` on the first file.
    pub start_index: i64,
}

impl Default for RenameOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            start_index: 1,
        }
    }
}

/// A planned or performed rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameOperation {
    /// Current path of the file.
    pub from: PathBuf,
    /// Path the file is renamed to, in the same directory.
    pub to: PathBuf,
}

/// Computes the renames for the files directly inside `dir`.
///
/// Sub-directories are skipped. Files are numbered in file-name order,
/// starting at `start_index` and wrapping around past `i64::MAX`. Nothing on
/// disk is changed.
pub fn plan_renames(
    dir: &Path,
    template: &RenameTemplate,
    start_index: i64,
) -> OrganizeResult<Vec<RenameOperation>> {
    validate_directory(dir)?;

    let read_dir_err = |e: std::io::Error| OrganizeError::ReadDirFailed {
        path: dir.to_path_buf(),
        source: e,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_err)? {
        let entry = entry.map_err(read_dir_err)?;
        let file_type = entry.file_type().map_err(|e| OrganizeError::MetadataFailed {
            path: entry.path(),
            source: e,
        })?;
        if !file_type.is_dir() {
            files.push(entry.file_name());
        }
    }
    files.sort();

    let operations = files
        .iter()
        .enumerate()
        .map(|(offset, name)| {
            let index = start_index.wrapping_add(offset as i64);
            let new_name = template.resolve(index, name);
            RenameOperation {
                from: dir.join(name),
                to: dir.join(new_name),
            }
        })
        .collect();

    Ok(operations)
}

/// Renames every file directly inside `dir` according to `template`.
///
/// With `options.dry_run` each planned rename is reported as
/// `Would rename: <old> -> <new>` and the filesystem is left alone. Otherwise
/// each rename is performed and reported as `Renamed: <old> -> <new>`.
///
/// Destination collisions are not checked; [`std::fs::rename`] replaces an
/// existing file and fails on an existing directory.
///
/// # Errors
///
/// Fails if `dir` is missing, not a directory, or unreadable. The first
/// failed rename stops the run; earlier renames are kept.
pub fn bulk_rename(
    dir: &Path,
    template: &RenameTemplate,
    options: &RenameOptions,
    out: &mut dyn Write,
) -> OrganizeResult<Vec<RenameOperation>> {
    let planned = plan_renames(dir, template, options.start_index)?;
    debug!(
        dir = %dir.display(),
        pattern = template.pattern(),
        files = planned.len(),
        "planned renames"
    );

    if options.dry_run {
        for op in &planned {
            writeln!(
                out,
                "Would rename: {} -> {}",
                op.from.display(),
                op.to.display()
            )?;
        }
        info!(planned = planned.len(), "dry run complete, nothing renamed");
        return Ok(planned);
    }

    let mut done = Vec::with_capacity(planned.len());
    for op in planned {
        fs::rename(&op.from, &op.to).map_err(|e| OrganizeError::RenameFailed {
            from: op.from.clone(),
            to: op.to.clone(),
            source: e,
        })?;
        writeln!(out, "Renamed: {} -> {}", op.from.display(), op.to.display())?;
        done.push(op);
    }

    info!(renamed = done.len(), "bulk rename complete");
    Ok(done)
}
