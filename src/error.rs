//! Error types shared by every command.
//!
//! All fallible operations return [`OrganizeResult<T>`]. Each variant names the
//! path (or value) that caused it so the message printed at the top level is
//! enough to locate the problem.

use std::path::PathBuf;

/// Errors that can occur while validating arguments or touching the filesystem.
#[derive(Debug, thiserror::Error)]
pub enum OrganizeError {
    /// A required positional argument was not supplied.
    #[error("please provide {0}")]
    MissingArgument(&'static str),

    /// No command is registered under the requested name.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// The `--sort` value is not one of `name`, `size`, `time`.
    #[error("unknown sort option: {0}")]
    UnknownSortOption(String),

    /// The base path could not be stat'ed.
    #[error("error accessing path {}: {source}", .path.display())]
    InvalidBasePath {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The base path exists but is not a directory.
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// Reading a file's metadata failed.
    #[error("cannot get file info for {}: {source}", .path.display())]
    MetadataFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to create a category directory.
    #[error("failed to create directory {}: {source}", .path.display())]
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to move a file into its category directory.
    #[error("failed to move file {} to {}: {source}", .from.display(), .to.display())]
    FileMoveFailure {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },

    /// Failed to rename a file during a bulk rename.
    #[error("failed to rename {} to {}: {source}", .from.display(), .to.display())]
    RenameFailed {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },

    /// Listing a single directory failed.
    #[error("error reading directory {}: {source}", .path.display())]
    ReadDirFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The recursive walk hit an entry it could not read.
    #[error("error walking directory {}: {source}", .root.display())]
    WalkFailed {
        root: PathBuf,
        source: walkdir::Error,
    },

    /// Writing a report line failed.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Result type for every organizer operation.
pub type OrganizeResult<T> = Result<T, OrganizeError>;
