//! Command registry: a name-keyed table of the available commands.

use std::collections::HashMap;
use std::io::Write;

use clap::{Arg, ArgMatches};

use crate::commands::{
    BulkRenameCommand, ListCommand, SortByDateCommand, SortBySizeCommand, SortByTypeCommand,
};
use crate::error::OrganizeResult;

/// A command the CLI can dispatch to.
///
/// Implementations declare their own clap arguments and validate them in
/// [`Command::execute`], so a missing positional surfaces as an
/// [`OrganizeError`](crate::OrganizeError) rather than a clap usage error.
pub trait Command {
    /// Subcommand name, also the registry key.
    fn name(&self) -> &'static str;

    /// One-line help text.
    fn description(&self) -> &'static str;

    /// Arguments and flags accepted by the command.
    fn args(&self) -> Vec<Arg> {
        Vec::new()
    }

    /// Runs the command, writing report lines to `out`.
    fn execute(&self, matches: &ArgMatches, out: &mut dyn Write) -> OrganizeResult<()>;

    /// Builds the clap subcommand for this command.
    fn cli_command(&self) -> clap::Command {
        clap::Command::new(self.name())
            .about(self.description())
            .args(self.args())
    }
}

/// Maps command names to their handlers.
///
/// Built once at startup and only read afterwards.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn Command>>,
}

impl CommandRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the five built-in commands.
    pub fn with_builtin_commands() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(SortByDateCommand));
        registry.register(Box::new(BulkRenameCommand));
        registry.register(Box::new(SortByTypeCommand));
        registry.register(Box::new(SortBySizeCommand));
        registry.register(Box::new(ListCommand));
        registry
    }

    /// Adds a command under its own name. A later registration with the same
    /// name replaces the earlier one.
    pub fn register(&mut self, command: Box<dyn Command>) {
        self.commands.insert(command.name().to_string(), command);
    }

    /// Looks a command up by name.
    pub fn get(&self, name: &str) -> Option<&dyn Command> {
        self.commands.get(name).map(|c| c.as_ref())
    }

    /// Returns every registered command, in no particular order.
    pub fn all(&self) -> Vec<&dyn Command> {
        self.commands.values().map(|c| c.as_ref()).collect()
    }
}
