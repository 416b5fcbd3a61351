use crate::defaults;
use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use log::LevelFilter;
use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

/// Everything one run needs. Built from the command line, or by hand when used as a library.
#[derive(Debug, Clone)]
pub struct Config {
    pub directory: PathBuf,
    pub pattern: String,
    pub excluded: BTreeSet<String>,
    pub marker: String,
    pub block: String,
    pub recursive: bool,
    pub dry_run: bool,
    pub verbosity: u8,
}

impl Config {
    /// The stock run against `directory`.
    pub fn with_defaults(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            pattern: defaults::PATTERN.to_string(),
            excluded: defaults::EXCLUDED.iter().map(|s| s.to_string()).collect(),
            marker: defaults::MARKER.to_string(),
            block: defaults::BLOCK.to_string(),
            recursive: false,
            dry_run: false,
            verbosity: 0,
        }
    }
}

pub fn command() -> Command {
    Command::new("mdappend")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Appends a marked block of text to matching markdown files, skipping files that already have it")
        .arg(
            Arg::new("dir")
                .value_name("DIR")
                .help("Directory to search [default: current directory]")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("pattern")
                .short('p')
                .long("pattern")
                .value_name("GLOB")
                .help("File name pattern to match")
                .default_value(defaults::PATTERN),
        )
        .arg(
            Arg::new("exclude")
                .short('x')
                .long("exclude")
                .value_name("NAME")
                .help("File name that must never be modified (repeatable)")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("no-default-excludes")
                .long("no-default-excludes")
                .help("Do not exclude the built-in file names")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("marker")
                .short('m')
                .long("marker")
                .value_name("TEXT")
                .help("Text whose presence means a file is already up to date")
                .default_value(defaults::MARKER),
        )
        .arg(
            Arg::new("block-file")
                .short('b')
                .long("block-file")
                .value_name("FILE")
                .help("Read the block to append from FILE instead of the built-in one")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("recursive")
                .short('r')
                .long("recursive")
                .help("Search subdirectories too")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("dry-run")
                .short('n')
                .long("dry-run")
                .help("Report what would change without writing anything")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Increase log output (-v, -vv, -vvv)")
                .action(ArgAction::Count),
        )
}

pub fn parse_args() -> Result<Config> {
    config_from_matches(&command().get_matches())
}

pub fn config_from_matches(matches: &ArgMatches) -> Result<Config> {
    let directory = match matches.get_one::<PathBuf>("dir") {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("Failed to resolve current directory")?,
    };

    let mut excluded: BTreeSet<String> = if matches.get_flag("no-default-excludes") {
        BTreeSet::new()
    } else {
        defaults::EXCLUDED.iter().map(|s| s.to_string()).collect()
    };
    excluded.extend(
        matches
            .get_many::<String>("exclude")
            .into_iter()
            .flatten()
            .cloned(),
    );

    let block = match matches.get_one::<PathBuf>("block-file") {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read block file: {}", path.display()))?,
        None => defaults::BLOCK.to_string(),
    };

    Ok(Config {
        directory,
        pattern: required(matches, "pattern"),
        excluded,
        marker: required(matches, "marker"),
        block,
        recursive: matches.get_flag("recursive"),
        dry_run: matches.get_flag("dry-run"),
        verbosity: matches.get_count("verbose"),
    })
}

/// String value of `id`, empty when the arg was not given.
fn required(matches: &ArgMatches, id: &str) -> String {
    matches.get_one::<String>(id).cloned().unwrap_or_default()
}

pub fn level_filter(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
