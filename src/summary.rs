use crate::error::FileError;
use std::fmt;
use std::path::{Path, PathBuf};

/// What happened to one matched file.
#[derive(Debug)]
pub enum Outcome {
    Updated,
    SkippedExcluded,
    SkippedAlreadyMarked,
    Errored(FileError),
}

impl Outcome {
    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Errored(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Updated => f.write_str("updated"),
            Outcome::SkippedExcluded => f.write_str("skipped (excluded)"),
            Outcome::SkippedAlreadyMarked => f.write_str("skipped (already marked)"),
            Outcome::Errored(err) => write!(f, "error: {err}"),
        }
    }
}

/// Per-file outcomes of one run, in processing order.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Directory the run was rooted at; report lines are shown relative to it.
    pub root: PathBuf,
    pub files: Vec<(PathBuf, Outcome)>,
    pub dry_run: bool,
}

impl RunSummary {
    pub fn record(&mut self, path: PathBuf, outcome: Outcome) {
        self.files.push((path, outcome));
    }

    pub fn total(&self) -> usize {
        self.files.len()
    }

    pub fn updated(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Updated))
    }

    pub fn skipped_excluded(&self) -> usize {
        self.count(|o| matches!(o, Outcome::SkippedExcluded))
    }

    pub fn skipped_marked(&self) -> usize {
        self.count(|o| matches!(o, Outcome::SkippedAlreadyMarked))
    }

    pub fn errored(&self) -> usize {
        self.count(Outcome::is_error)
    }

    pub fn has_errors(&self) -> bool {
        self.files.iter().any(|(_, o)| o.is_error())
    }

    /// Outcome recorded for `path`, if it was matched.
    pub fn outcome(&self, path: &Path) -> Option<&Outcome> {
        self.files
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, o)| o)
    }

    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.files.iter().filter(|(_, o)| pred(o)).count()
    }
}

/// One report line: the path relative to the run root, then what happened to it.
pub struct FileLine<'a> {
    pub root: &'a Path,
    pub path: &'a Path,
    pub outcome: &'a Outcome,
    pub dry_run: bool,
}

impl fmt::Display for FileLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rel_path = self.path.strip_prefix(self.root).unwrap_or(self.path);
        match self.outcome {
            Outcome::Updated if self.dry_run => write!(f, "{}: would update", rel_path.display()),
            outcome => write!(f, "{}: {outcome}", rel_path.display()),
        }
    }
}

/// The closing counters of a run.
pub struct Totals<'a>(&'a RunSummary);

impl fmt::Display for Totals<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.0;
        let verb = if summary.dry_run { "Would update" } else { "Updated" };
        writeln!(f, "{verb}: {}", summary.updated())?;
        writeln!(f, "Skipped (already marked): {}", summary.skipped_marked())?;
        writeln!(f, "Skipped (excluded): {}", summary.skipped_excluded())?;
        writeln!(f, "Errored: {}", summary.errored())?;
        write!(f, "Total matched: {}", summary.total())
    }
}

impl RunSummary {
    pub fn line<'a>(&'a self, path: &'a Path, outcome: &'a Outcome) -> FileLine<'a> {
        FileLine {
            root: &self.root,
            path,
            outcome,
            dry_run: self.dry_run,
        }
    }

    pub fn totals(&self) -> Totals<'_> {
        Totals(self)
    }
}

/// Human-readable report: one line per file, then the totals.
impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (path, outcome) in &self.files {
            writeln!(f, "{}", self.line(path, outcome))?;
        }
        writeln!(f)?;
        write!(f, "{}", self.totals())
    }
}
