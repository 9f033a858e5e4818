//! The five built-in commands.
//!
//! Each command declares its clap arguments, checks that the required ones are
//! present and hands off to the matching engine.

use std::io::Write;
use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, value_parser};

use crate::error::{OrganizeError, OrganizeResult};
use crate::file_category::Categorizer;
use crate::file_organizer::FileOrganizer;
use crate::listing::{ListOptions, SortKey, list_files};
use crate::output::OutputFormatter;
use crate::registry::Command;
use crate::rename::{RenameOptions, RenameTemplate, bulk_rename};

const DIR_ARG: &str = "dir";
const PATTERN_ARG: &str = "pattern";

const MISSING_DIR: &str = "a directory path";
const MISSING_DIR_AND_PATTERN: &str = "a directory path and rename pattern";

fn dir_arg() -> Arg {
    Arg::new(DIR_ARG)
        .value_name("DIR")
        .help("Directory to operate on")
        .value_parser(value_parser!(PathBuf))
}

fn dir_from(matches: &ArgMatches, missing: &'static str) -> OrganizeResult<PathBuf> {
    matches
        .get_one::<PathBuf>(DIR_ARG)
        .cloned()
        .ok_or(OrganizeError::MissingArgument(missing))
}

/// Shared body of the three sort commands.
fn run_sort(
    matches: &ArgMatches,
    categorizer: Categorizer,
    out: &mut dyn Write,
) -> OrganizeResult<()> {
    let dir = dir_from(matches, MISSING_DIR)?;
    let moved = FileOrganizer::organize(&dir, categorizer, out)?;
    OutputFormatter::success(
        out,
        &format!("Moved {}", OutputFormatter::count_files(moved.len())),
    )?;
    Ok(())
}

/// `sortbydate <dir>`
pub struct SortByDateCommand;

impl Command for SortByDateCommand {
    fn name(&self) -> &'static str {
        "sortbydate"
    }

    fn description(&self) -> &'static str {
        "Sort files into directories named after their modification date (DDMMYYYY)"
    }

    fn args(&self) -> Vec<Arg> {
        vec![dir_arg()]
    }

    fn execute(&self, matches: &ArgMatches, out: &mut dyn Write) -> OrganizeResult<()> {
        run_sort(matches, Categorizer::Date, out)
    }
}

/// `sortbytype <dir>`
pub struct SortByTypeCommand;

impl Command for SortByTypeCommand {
    fn name(&self) -> &'static str {
        "sortbytype"
    }

    fn description(&self) -> &'static str {
        "Sort files into directories based on their file extension"
    }

    fn args(&self) -> Vec<Arg> {
        vec![dir_arg()]
    }

    fn execute(&self, matches: &ArgMatches, out: &mut dyn Write) -> OrganizeResult<()> {
        run_sort(matches, Categorizer::Type, out)
    }
}

/// `sortbysize <dir>`
pub struct SortBySizeCommand;

impl Command for SortBySizeCommand {
    fn name(&self) -> &'static str {
        "sortbysize"
    }

    fn description(&self) -> &'static str {
        "Sort files into directories based on their size (small, medium, large)"
    }

    fn args(&self) -> Vec<Arg> {
        vec![dir_arg()]
    }

    fn execute(&self, matches: &ArgMatches, out: &mut dyn Write) -> OrganizeResult<()> {
        run_sort(matches, Categorizer::Size, out)
    }
}

/// `bulkrename <dir> <pattern> [--dry-run] [--start N]`
pub struct BulkRenameCommand;

impl Command for BulkRenameCommand {
    fn name(&self) -> &'static str {
        "bulkrename"
    }

    fn description(&self) -> &'static str {
        "Bulk rename files based on a pattern ({index}, {name}, {ext})"
    }

    fn args(&self) -> Vec<Arg> {
        vec![
            dir_arg(),
            Arg::new(PATTERN_ARG)
                .value_name("PATTERN")
                .help("New name template, e.g. \"img-{index}{ext}\""),
            Arg::new("dry-run")
                .long("dry-run")
                .action(ArgAction::SetTrue)
                .help("Show what would be renamed without actually renaming"),
            Arg::new("start")
                .long("start")
                .value_name("N")
                .value_parser(value_parser!(i64))
                .allow_negative_numbers(true)
                .default_value("1")
                .help("Starting index for the {index} placeholder"),
        ]
    }

    fn execute(&self, matches: &ArgMatches, out: &mut dyn Write) -> OrganizeResult<()> {
        let dir = dir_from(matches, MISSING_DIR_AND_PATTERN)?;
        let pattern = matches
            .get_one::<String>(PATTERN_ARG)
            .ok_or(OrganizeError::MissingArgument(MISSING_DIR_AND_PATTERN))?;

        let options = RenameOptions {
            dry_run: matches.get_flag("dry-run"),
            start_index: matches.get_one::<i64>("start").copied().unwrap_or(1),
        };
        let template = RenameTemplate::new(pattern.as_str());

        if options.dry_run {
            OutputFormatter::dry_run_notice(out, "No files will be renamed")?;
        }

        let renamed = bulk_rename(&dir, &template, &options, out)?;

        if !options.dry_run {
            OutputFormatter::success(
                out,
                &format!("Renamed {}", OutputFormatter::count_files(renamed.len())),
            )?;
        }
        Ok(())
    }
}

/// `list <dir> [--sort name|size|time] [--recursive]`
pub struct ListCommand;

impl Command for ListCommand {
    fn name(&self) -> &'static str {
        "list"
    }

    fn description(&self) -> &'static str {
        "List files with various sorting options"
    }

    fn args(&self) -> Vec<Arg> {
        vec![
            dir_arg(),
            Arg::new("sort")
                .long("sort")
                .value_name("KEY")
                .default_value(SortKey::Name.as_str())
                .help("Sort by (name, size, time)"),
            Arg::new("recursive")
                .long("recursive")
                .action(ArgAction::SetTrue)
                .help("List files recursively"),
        ]
    }

    fn execute(&self, matches: &ArgMatches, out: &mut dyn Write) -> OrganizeResult<()> {
        let dir = dir_from(matches, MISSING_DIR)?;
        let sort = match matches.get_one::<String>("sort") {
            Some(value) => value.parse::<SortKey>()?,
            None => SortKey::default(),
        };

        let options = ListOptions {
            sort,
            recursive: matches.get_flag("recursive"),
        };
        list_files(&dir, &options, out)?;
        Ok(())
    }
}
