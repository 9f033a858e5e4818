//! simonsays - a swiss-knife tool for file and directory manipulation
//!
//! This library sorts the files of a directory tree into sub-folders by
//! modification date, extension or size, bulk-renames files from a template
//! pattern and produces sorted file listings. Every command is a single
//! synchronous pass that stops at the first error.

pub mod cli;
pub mod commands;
pub mod error;
pub mod file_category;
pub mod file_entry;
pub mod file_organizer;
pub mod listing;
pub mod output;
pub mod registry;
pub mod rename;

pub use error::{OrganizeError, OrganizeResult};
pub use file_category::{Categorizer, SizeBucket};
pub use file_entry::FileEntry;
pub use file_organizer::{FileOrganizer, Operation};
pub use listing::{ListOptions, SortKey};
pub use registry::{Command, CommandRegistry};
pub use rename::{RenameOptions, RenameTemplate};

pub use cli::{Cli, build_command, run_cli};
