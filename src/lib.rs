//! # mdappend Library
//!
//! Appends a fixed block of text to every markdown file in a directory that matches a glob,
//! unless the file already contains a marker string or its name is excluded.
//!
//! Running it twice is safe: the block contains the marker, so files updated by the first
//! run are skipped by the second. Files are replaced atomically, and a failure on one file
//! is recorded in the [`RunSummary`] without stopping the rest.
//!
//! ## Usage
//!
//! ```no_run
//! use mdappend::{Config, apply};
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut config = Config::with_defaults("docs/agents");
//!     config.marker = "UNIQUE_TOKEN".to_string();
//!     config.block = "\n\n## UNIQUE_TOKEN\nExtra content".to_string();
//!
//!     let summary = apply(&config)?;
//!     println!("{summary}");
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod defaults;
pub mod error;
pub mod exit_codes;
pub mod filewalker;
pub mod patcher;
pub mod summary;

pub use cli::Config;
pub use error::{ApplyError, FileError};
pub use filewalker::collect_files;
pub use summary::{FileLine, Outcome, RunSummary};

use log::{debug, info, warn};
use std::collections::BTreeSet;
use std::path::Path;

/// Switches that change how files are found and whether they are written.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApplyOptions {
    pub recursive: bool,
    pub dry_run: bool,
}

/// Runs the batch described by `config`.
pub fn apply(config: &Config) -> Result<RunSummary, ApplyError> {
    apply_with(config, |_| {})
}

/// Like [`apply`], but hands each file's report line to `on_file` as soon as that file is
/// done.
pub fn apply_with(
    config: &Config,
    on_file: impl FnMut(&FileLine<'_>),
) -> Result<RunSummary, ApplyError> {
    run(
        &config.directory,
        &config.pattern,
        &config.excluded,
        &config.marker,
        &config.block,
        ApplyOptions {
            recursive: config.recursive,
            dry_run: config.dry_run,
        },
        on_file,
    )
}

/// Appends `block` to every file under `directory` matching `pattern` that is not in
/// `excluded` and does not already contain `marker`.
///
/// Only setup problems are returned as errors. Per-file failures end up in the summary.
pub fn apply_to(
    directory: &Path,
    pattern: &str,
    excluded: &BTreeSet<String>,
    marker: &str,
    block: &str,
    options: ApplyOptions,
) -> Result<RunSummary, ApplyError> {
    run(directory, pattern, excluded, marker, block, options, |_| {})
}

fn run(
    directory: &Path,
    pattern: &str,
    excluded: &BTreeSet<String>,
    marker: &str,
    block: &str,
    options: ApplyOptions,
    mut on_file: impl FnMut(&FileLine<'_>),
) -> Result<RunSummary, ApplyError> {
    if marker.is_empty() {
        return Err(ApplyError::EmptyMarker);
    }
    if !block.contains(marker) {
        return Err(ApplyError::BlockMissingMarker(marker.to_string()));
    }

    let files = collect_files(directory, pattern, options.recursive)?;
    info!("Found {} file(s) matching {pattern:?}", files.len());

    let mut summary = RunSummary {
        root: directory.to_path_buf(),
        dry_run: options.dry_run,
        ..RunSummary::default()
    };

    for path in files {
        let outcome = process_file(&path, excluded, marker, block, options.dry_run);
        match &outcome {
            Outcome::Errored(err) => warn!("{}: {err}", path.display()),
            other => debug!("{}: {other}", path.display()),
        }
        on_file(&summary.line(&path, &outcome));
        summary.record(path, outcome);
    }

    info!(
        "{} updated, {} already marked, {} excluded, {} errored",
        summary.updated(),
        summary.skipped_marked(),
        summary.skipped_excluded(),
        summary.errored()
    );
    Ok(summary)
}

fn process_file(
    path: &Path,
    excluded: &BTreeSet<String>,
    marker: &str,
    block: &str,
    dry_run: bool,
) -> Outcome {
    let is_excluded = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| excluded.contains(n));
    if is_excluded {
        return Outcome::SkippedExcluded;
    }

    let content = match patcher::read_text(path) {
        Ok(content) => content,
        Err(err) => return Outcome::Errored(err),
    };

    if content.contains(marker) {
        return Outcome::SkippedAlreadyMarked;
    }

    if dry_run {
        return Outcome::Updated;
    }

    match patcher::replace(path, &patcher::append_block(&content, block)) {
        Ok(()) => Outcome::Updated,
        Err(err) => Outcome::Errored(err),
    }
}
