//! Traversal-and-move engine shared by the date, type and size sort commands.
//!
//! The engine walks a directory tree, asks a [`Categorizer`] for each file's
//! category key, creates that folder next to the file and moves the file into
//! it. The first failure stops the walk; moves already made stay in place.
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{OrganizeError, OrganizeResult};
use crate::file_category::Categorizer;
use crate::file_entry::{FileEntry, validate_directory};

/// Represents a single file move performed during a sort run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    /// The path of the file before the move.
    pub original_path: PathBuf,
    /// The path of the file after the move.
    pub new_path: PathBuf,
    /// The category folder the file was moved into.
    pub category: OsString,
}

/// Moves files into category sub-folders beside them.
pub struct FileOrganizer;

impl FileOrganizer {
    /// Sorts every file below `root` into sub-folders named by `categorizer`.
    ///
    /// The root itself and all directories are skipped. Each directory's
    /// entries are read in full and sorted by name before any of them is
    /// processed, so folders created during the run are not descended into
    /// unless they already existed. Each move is reported on `out` as
    /// `Moved <old> to <new>`.
    ///
    /// # Errors
    ///
    /// Fails before touching anything if `root` is missing or not a
    /// directory. Afterwards, the first walk, metadata, mkdir or rename error
    /// aborts the run and names the offending path.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use simonsays::file_category::Categorizer;
    /// use simonsays::file_organizer::FileOrganizer;
    /// use std::path::Path;
    ///
    /// let mut out = std::io::stdout();
    /// let moved = FileOrganizer::organize(Path::new("/path/to/downloads"), Categorizer::Type, &mut out);
    /// match moved {
    ///     Ok(ops) => println!("{} files moved", ops.len()),
    ///     Err(e) => eprintln!("Sort failed: {}", e),
    /// }
    /// ```
    pub fn organize(
        root: &Path,
        categorizer: Categorizer,
        out: &mut dyn Write,
    ) -> OrganizeResult<Vec<Operation>> {
        validate_directory(root)?;

        let mut operations = Vec::new();

        for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| OrganizeError::WalkFailed {
                root: root.to_path_buf(),
                source: e,
            })?;

            if entry.file_type().is_dir() {
                continue;
            }

            let metadata = entry.metadata().map_err(|e| OrganizeError::MetadataFailed {
                path: entry.path().to_path_buf(),
                source: io::Error::from(e),
            })?;
            let file = FileEntry::from_metadata(entry.into_path(), &metadata);

            let category = categorizer.category_for(&file);
            debug!(
                path = %file.path.display(),
                category = %category.to_string_lossy(),
                "categorized file"
            );

            let operation = Self::move_to_category_with_record(&file.path, &category)?;
            writeln!(
                out,
                "Moved {} to {}",
                operation.original_path.display(),
                operation.new_path.display()
            )?;
            operations.push(operation);
        }

        info!(
            root = %root.display(),
            strategy = ?categorizer,
            moved = operations.len(),
            "sort complete"
        );

        Ok(operations)
    }

    /// Moves a file into the `category_dir_name` folder inside its own parent
    /// directory and records the operation.
    ///
    /// The category folder is created if missing; an existing folder is
    /// reused. An existing file at the destination is replaced, following
    /// [`std::fs::rename`].
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use simonsays::file_organizer::FileOrganizer;
    /// use std::path::Path;
    ///
    /// let op = FileOrganizer::move_to_category_with_record(
    ///     Path::new("/path/to/base/image.png"),
    ///     "png",
    /// );
    /// match op {
    ///     Ok(op) => println!("Moved {} to {}", op.original_path.display(), op.new_path.display()),
    ///     Err(e) => eprintln!("Move failed: {}", e),
    /// }
    /// ```
    pub fn move_to_category_with_record(
        file_path: &Path,
        category_dir_name: impl AsRef<OsStr>,
    ) -> OrganizeResult<Operation> {
        let category_dir_name = category_dir_name.as_ref();
        let (parent, file_name) = match (file_path.parent(), file_path.file_name()) {
            (Some(parent), Some(name)) => (parent, name),
            _ => {
                return Err(OrganizeError::FileMoveFailure {
                    from: file_path.to_path_buf(),
                    to: PathBuf::from(category_dir_name),
                    source: io::Error::new(
                        io::ErrorKind::InvalidInput,
                        "file has no parent or name component",
                    ),
                });
            }
        };

        let category_path = parent.join(category_dir_name);
        create_category_dir(&category_path).map_err(|e| {
            OrganizeError::DirectoryCreationFailed {
                path: category_path.clone(),
                source: e,
            }
        })?;
        debug!(path = %category_path.display(), "category directory ready");

        let destination_path = category_path.join(file_name);
        fs::rename(file_path, &destination_path).map_err(|e| OrganizeError::FileMoveFailure {
            from: file_path.to_path_buf(),
            to: destination_path.clone(),
            source: e,
        })?;

        Ok(Operation {
            original_path: file_path.to_path_buf(),
            new_path: destination_path,
            category: category_dir_name.to_os_string(),
        })
    }
}

/// Creates a category folder and any missing parents; existing folders are fine.
fn create_category_dir(path: &Path) -> io::Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }
    builder.create(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn organize_to_string(
        root: &Path,
        categorizer: Categorizer,
    ) -> (OrganizeResult<Vec<Operation>>, String) {
        let mut out = Vec::new();
        let result = FileOrganizer::organize(root, categorizer, &mut out);
        (result, String::from_utf8(out).expect("Output is not UTF-8"))
    }

    #[test]
    fn test_move_to_category_creates_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        let file_path = base_path.join("test.txt");
        fs::write(&file_path, "test content").expect("Failed to write test file");

        let op = FileOrganizer::move_to_category_with_record(&file_path, "txt")
            .expect("Failed to move file");

        let category_dir = base_path.join("txt");
        assert!(category_dir.is_dir());
        assert!(!file_path.exists());
        assert!(category_dir.join("test.txt").exists());
        assert_eq!(op.original_path, file_path);
        assert_eq!(op.new_path, category_dir.join("test.txt"));
        assert_eq!(op.category, "txt");
    }

    #[test]
    fn test_move_to_category_uses_existing_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        let category_dir = base_path.join("png");
        fs::create_dir(&category_dir).expect("Failed to create category directory");

        let file_path = base_path.join("test.png");
        fs::write(&file_path, "test content").expect("Failed to write test file");

        FileOrganizer::move_to_category_with_record(&file_path, "png")
            .expect("Failed to move file");

        assert!(!file_path.exists());
        assert!(category_dir.join("test.png").exists());
    }

    #[test]
    fn test_move_to_category_missing_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file_path = temp_dir.path().join("ghost.txt");

        let err = FileOrganizer::move_to_category_with_record(&file_path, "txt").unwrap_err();
        assert!(matches!(err, OrganizeError::FileMoveFailure { .. }));
        assert!(err.to_string().contains("ghost.txt"));
    }

    #[test]
    fn test_organize_moves_into_sibling_folders() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();
        let nested = base_path.join("nested");
        fs::create_dir(&nested).expect("Failed to create subdirectory");
        fs::write(base_path.join("top.md"), "top").expect("Failed to write file");
        fs::write(nested.join("deep.md"), "deep").expect("Failed to write file");

        let (result, output) = organize_to_string(base_path, Categorizer::Type);
        let ops = result.expect("Organize failed");

        assert_eq!(ops.len(), 2);
        assert!(base_path.join("md").join("top.md").exists());
        assert!(nested.join("md").join("deep.md").exists());
        assert_eq!(output.lines().count(), 2);
        assert!(output.lines().all(|line| line.starts_with("Moved ")));
    }

    #[test]
    fn test_organize_processes_in_name_order() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();
        for name in ["c.txt", "a.txt", "b.txt"] {
            fs::write(base_path.join(name), name).expect("Failed to write file");
        }

        let (result, _) = organize_to_string(base_path, Categorizer::Type);
        let names: Vec<_> = result
            .expect("Organize failed")
            .iter()
            .map(|op| op.new_path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "c.txt"]);
    }

    #[test]
    fn test_organize_does_not_revisit_created_folders() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();
        fs::write(base_path.join("notes.txt"), "notes").expect("Failed to write file");

        let (result, _) = organize_to_string(base_path, Categorizer::Type);
        assert_eq!(result.expect("Organize failed").len(), 1);
        assert!(base_path.join("txt").join("notes.txt").exists());
        assert!(!base_path.join("txt").join("txt").exists());
    }

    #[test]
    fn test_organize_rejects_file_root() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file_path = temp_dir.path().join("single.txt");
        fs::write(&file_path, "x").expect("Failed to write file");

        let (result, output) = organize_to_string(&file_path, Categorizer::Size);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("single.txt"));
        assert!(output.is_empty());
        assert!(file_path.exists());
        assert!(!temp_dir.path().join("small").exists());
    }

    #[test]
    fn test_organize_stops_at_first_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();
        fs::write(base_path.join("a.md"), "a").expect("Failed to write file");
        fs::write(base_path.join("b.md"), "b").expect("Failed to write file");
        fs::write(base_path.join("c.md"), "c").expect("Failed to write file");
        // A non-empty directory at the destination makes the rename fail.
        fs::create_dir_all(base_path.join("md").join("b.md").join("keep"))
            .expect("Failed to create blocker");

        let (result, output) = organize_to_string(base_path, Categorizer::Type);
        let err = result.unwrap_err();

        assert!(matches!(err, OrganizeError::FileMoveFailure { .. }));
        assert!(err.to_string().contains(&base_path.join("b.md").display().to_string()));
        assert!(base_path.join("md").join("a.md").is_file());
        assert!(base_path.join("b.md").exists());
        assert!(base_path.join("c.md").exists());
        assert_eq!(output.lines().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_organize_keeps_non_utf8_extension() {
        use std::os::unix::ffi::OsStrExt;

        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();
        let name = OsStr::from_bytes(b"a.t\xe9t");
        fs::write(base_path.join(name), "a").expect("Failed to write file");

        let (result, _) = organize_to_string(base_path, Categorizer::Type);
        let ops = result.expect("Organize failed");

        let folder = OsStr::from_bytes(b"t\xe9t");
        assert_eq!(ops[0].category.as_os_str(), folder);
        assert!(base_path.join(folder).join(name).is_file());
        assert!(!base_path.join("t\u{FFFD}t").exists());
    }

    #[test]
    fn test_organize_reports_mkdir_failure() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();
        fs::write(base_path.join("a.txt"), "a").expect("Failed to write file");
        // A plain file squatting on the category name makes the mkdir fail.
        fs::write(base_path.join("txt"), "blocker").expect("Failed to write file");

        let (result, output) = organize_to_string(base_path, Categorizer::Type);
        let err = result.unwrap_err();

        assert!(matches!(err, OrganizeError::DirectoryCreationFailed { .. }));
        assert!(base_path.join("a.txt").exists());
        assert!(output.is_empty());
    }
}
