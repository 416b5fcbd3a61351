use crate::error::ApplyError;
use ignore::overrides::{Override, OverrideBuilder};
use ignore::{DirEntry, WalkBuilder};
use log::{debug, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Collects the files under `root` whose names match `pattern`, sorted by path.
///
/// Symlinks are kept unless they point at a directory; a dangling link is kept too, so its
/// failure shows up when it is read. Only the top level of `root` is searched unless
/// `recursive` is set. Hidden entries are never matched and ignore files (`.gitignore` and
/// friends) are not consulted.
pub fn collect_files(
    root: &Path,
    pattern: &str,
    recursive: bool,
) -> Result<Vec<PathBuf>, ApplyError> {
    check_dir(root)?;
    let matcher = build_matcher(root, pattern)?;

    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .max_depth(if recursive { None } else { Some(1) })
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

    let mut files = Vec::new();

    for result in builder.build() {
        match result {
            Ok(entry) => {
                if is_candidate(&entry) && matcher.matched(entry.path(), false).is_whitelist() {
                    files.push(entry.into_path());
                }
            }
            Err(err) => {
                warn!("Error walking path: {err}");
            }
        }
    }

    files.sort();
    debug!("{} file(s) match {pattern:?} in {}", files.len(), root.display());
    Ok(files)
}

fn check_dir(root: &Path) -> Result<(), ApplyError> {
    let unreadable = |reason: String| ApplyError::DirectoryUnreadable {
        path: root.to_path_buf(),
        reason,
    };

    let meta = match fs::metadata(root) {
        Ok(meta) => meta,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(ApplyError::DirectoryNotFound(root.to_path_buf()));
        }
        Err(err) => return Err(unreadable(err.to_string())),
    };

    if !meta.is_dir() {
        return Err(unreadable("not a directory".to_string()));
    }

    fs::read_dir(root).map_err(|err| unreadable(err.to_string()))?;
    Ok(())
}

fn build_matcher(root: &Path, pattern: &str) -> Result<Override, ApplyError> {
    let invalid = |source| ApplyError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    };

    let mut builder = OverrideBuilder::new(root);
    builder.add(pattern).map_err(invalid)?;
    builder.build().map_err(invalid)
}

fn is_candidate(entry: &DirEntry) -> bool {
    match entry.file_type() {
        Some(t) if t.is_file() => true,
        Some(t) if t.is_symlink() => !entry.path().is_dir(),
        _ => false,
    }
}

/// Determines if a file/folder is hidden (starts with a dot)
fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .path()
        .file_name()
        .and_then(|s| s.to_str())
        .is_some_and(|s| s.starts_with('.'))
}
