//! Command-line interface module for simonsays.
//!
//! This module handles all CLI-related functionality including:
//! - Global flags (verbosity, color)
//! - Building the clap command tree from the [`CommandRegistry`]
//! - Logging setup
//! - Dispatching a parsed invocation to its command

use std::io::Write;

use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser};
use tracing::debug;

use crate::error::{OrganizeError, OrganizeResult};
use crate::output::OutputFormatter;
use crate::registry::CommandRegistry;

/// Global flags shared by every subcommand.
#[derive(Debug, Clone, Parser)]
#[command(name = "simonsays")]
#[command(version)]
#[command(about = "A swiss-knife tool for file and directory manipulation")]
pub struct Cli {
    /// Enable verbose (debug) logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

impl Cli {
    /// Extracts the global flags from a full parse produced by [`build_command`].
    pub fn from_matches(matches: &ArgMatches) -> Result<Self, clap::Error> {
        Self::from_arg_matches(matches)
    }

    /// Installs the stderr log subscriber and applies the color setting.
    pub fn setup_logging(&self) {
        let level = if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        };

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .with_ansi(!self.no_color)
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .init();

        OutputFormatter::set_color_enabled(!self.no_color);
    }
}

/// Builds the full clap command: global flags plus one subcommand per
/// registered command.
pub fn build_command(registry: &CommandRegistry) -> clap::Command {
    registry.all().into_iter().fold(
        Cli::command()
            .subcommand_required(true)
            .arg_required_else_help(true),
        |app, command| app.subcommand(command.cli_command()),
    )
}

/// Runs the subcommand selected in `matches`, writing its report to `out`.
///
/// `out` is flushed once the command succeeds; a failed flush is an error.
///
/// # Examples
///
/// ```no_run
/// use simonsays::cli::{build_command, run_cli};
/// use simonsays::registry::CommandRegistry;
///
/// let registry = CommandRegistry::with_builtin_commands();
/// let matches = build_command(&registry).get_matches_from(["simonsays", "list", "."]);
/// let mut out = std::io::stdout();
/// if let Err(e) = run_cli(&registry, &matches, &mut out) {
///     eprintln!("Error: {}", e);
/// }
/// ```
pub fn run_cli(
    registry: &CommandRegistry,
    matches: &ArgMatches,
    out: &mut dyn Write,
) -> OrganizeResult<()> {
    let (name, sub_matches) = matches
        .subcommand()
        .ok_or(OrganizeError::MissingArgument("a command"))?;

    let command = registry
        .get(name)
        .ok_or_else(|| OrganizeError::UnknownCommand(name.to_string()))?;

    debug!(command = name, "dispatching");
    command.execute(sub_matches, out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_tree_has_every_subcommand() {
        let registry = CommandRegistry::with_builtin_commands();
        let app = build_command(&registry);

        let mut names: Vec<&str> = app.get_subcommands().map(|c| c.get_name()).collect();
        names.sort();
        assert_eq!(
            names,
            vec!["bulkrename", "list", "sortbydate", "sortbysize", "sortbytype"]
        );
    }

    #[test]
    fn test_command_tree_is_valid() {
        let registry = CommandRegistry::with_builtin_commands();
        build_command(&registry).debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let registry = CommandRegistry::with_builtin_commands();
        let matches = build_command(&registry)
            .try_get_matches_from(["simonsays", "list", ".", "--verbose", "--no-color"])
            .expect("Failed to parse");

        let cli = Cli::from_matches(&matches).expect("Failed to read global flags");
        assert!(cli.verbose);
        assert!(cli.no_color);
    }

    #[test]
    fn test_global_flags_default_off() {
        let registry = CommandRegistry::with_builtin_commands();
        let matches = build_command(&registry)
            .try_get_matches_from(["simonsays", "sortbytype", "."])
            .expect("Failed to parse");

        let cli = Cli::from_matches(&matches).expect("Failed to read global flags");
        assert!(!cli.verbose);
        assert!(!cli.no_color);
    }

    #[test]
    fn test_missing_subcommand_is_usage_error() {
        let registry = CommandRegistry::with_builtin_commands();
        let result = build_command(&registry).try_get_matches_from(["simonsays"]);
        assert!(result.is_err());
    }

    struct UnflushableWriter {
        written: Vec<u8>,
    }

    impl Write for UnflushableWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdout closed"))
        }
    }

    #[test]
    fn test_failed_flush_is_reported() {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp directory");
        std::fs::write(temp_dir.path().join("a.txt"), "a").expect("Failed to write file");
        let dir = temp_dir.path().to_string_lossy().into_owned();

        let registry = CommandRegistry::with_builtin_commands();
        let matches = build_command(&registry)
            .try_get_matches_from(["simonsays", "list", dir.as_str()])
            .expect("Failed to parse");

        let mut out = UnflushableWriter { written: Vec::new() };
        let err = run_cli(&registry, &matches, &mut out).unwrap_err();

        assert!(matches!(
            err,
            OrganizeError::Output(ref e) if e.kind() == std::io::ErrorKind::BrokenPipe
        ));
        assert!(String::from_utf8_lossy(&out.written).starts_with("Files:"));
    }

    #[test]
    fn test_unregistered_subcommand_is_rejected() {
        let registry = CommandRegistry::new();
        let matches = Cli::command()
            .subcommand(clap::Command::new("ghost"))
            .try_get_matches_from(["simonsays", "ghost"])
            .expect("Failed to parse");

        let mut out = Vec::new();
        let err = run_cli(&registry, &matches, &mut out).unwrap_err();
        assert!(matches!(err, OrganizeError::UnknownCommand(ref name) if name == "ghost"));
    }
}
