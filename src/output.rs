//! Output formatting and styling module.
//!
//! Status lines (success, error, dry-run notices) go through [`OutputFormatter`]
//! so their styling is decided in one place. Per-file report lines are written
//! plain by the engines.

use colored::*;
use std::io::{self, Write};

/// Writes styled status lines.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Writes a success message with a green checkmark.
    ///
    /// # Example
    ///
    /// ```
    /// use simonsays::output::OutputFormatter;
    ///
    /// let mut out = Vec::new();
    /// OutputFormatter::success(&mut out, "Moved 3 files").unwrap();
    /// assert!(String::from_utf8(out).unwrap().contains("Moved 3 files"));
    /// ```
    pub fn success(out: &mut dyn Write, message: &str) -> io::Result<()> {
        writeln!(out, "{} {}", "✓".green(), message)
    }

    /// Prints an error message to stderr with a red X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Writes a dry-run notice in yellow.
    pub fn dry_run_notice(out: &mut dyn Write, message: &str) -> io::Result<()> {
        writeln!(out, "{}", format!("[DRY RUN] {}", message).yellow())
    }

    /// Turns styling off for the rest of the process when `enabled` is false.
    /// Otherwise `colored` decides from the environment.
    pub fn set_color_enabled(enabled: bool) {
        if !enabled {
            colored::control::set_override(false);
        }
    }

    /// `"1 file"`, `"3 files"`.
    pub fn count_files(count: usize) -> String {
        format!("{} {}", count, if count == 1 { "file" } else { "files" })
    }
}
