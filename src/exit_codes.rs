//! Stable exit codes for the mdappend CLI.

use crate::summary::RunSummary;

/// Run finished and no file errored.
pub const OK: i32 = 0;
/// Run finished but at least one file could not be read or written.
pub const FILE_ERRORS: i32 = 1;
/// Setup failed before any file was touched (bad arguments, missing directory, bad pattern).
pub const FATAL: i32 = 2;

pub fn for_summary(summary: &RunSummary) -> i32 {
    if summary.has_errors() { FILE_ERRORS } else { OK }
}
