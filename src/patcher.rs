//! Reading, patching and atomically replacing a single target file.
//!
//! Writes never go straight to the target. The new content is staged in a temp file next to
//! it and renamed over it, so an interrupted run leaves either the old or the new content.

use crate::error::FileError;
use content_inspector::{ContentType, inspect};
use log::debug;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Bytes inspected when deciding whether a file is text.
const SAMPLE_SIZE: usize = 8192;

/// Reads the whole file as UTF-8 text. Binary or undecodable content is an error.
pub fn read_text(path: &Path) -> Result<String, FileError> {
    let bytes = fs::read(path).map_err(FileError::Read)?;

    let sample = &bytes[..bytes.len().min(SAMPLE_SIZE)];
    if inspect(sample) == ContentType::BINARY {
        return Err(FileError::NotText);
    }

    String::from_utf8(bytes).map_err(|_| FileError::NotText)
}

/// Existing content with trailing whitespace trimmed, followed by `block`.
pub fn append_block(content: &str, block: &str) -> String {
    let head = content.trim_end();
    let mut out = String::with_capacity(head.len() + block.len());
    out.push_str(head);
    out.push_str(block);
    out
}

/// New content fully written to disk but not yet visible at the target path.
///
/// Dropping it without calling [`StagedWrite::commit`] deletes the temp file and leaves the
/// target untouched.
#[derive(Debug)]
pub struct StagedWrite {
    temp: NamedTempFile,
    target: PathBuf,
}

impl StagedWrite {
    pub fn temp_path(&self) -> &Path {
        self.temp.path()
    }

    /// Renames the staged file over the target.
    pub fn commit(self) -> Result<(), FileError> {
        let Self { temp, target } = self;
        temp.persist(&target).map_err(|e| FileError::Commit(e.error))?;
        debug!("Replaced {}", target.display());
        Ok(())
    }
}

/// Writes `contents` to a temp file next to `target`, carrying over the target's
/// permissions.
///
/// Symlinks are resolved first, so the file they point at is replaced and the link survives.
/// A target without any write permission is refused before anything is staged.
pub fn stage(target: &Path, contents: &str) -> Result<StagedWrite, FileError> {
    let target = fs::canonicalize(target).map_err(FileError::Stage)?;
    let perms = fs::metadata(&target).map_err(FileError::Stage)?.permissions();
    if perms.readonly() {
        return Err(FileError::ReadOnly);
    }

    let dir = target.parent().unwrap_or_else(|| Path::new("."));
    let mut temp = NamedTempFile::new_in(dir).map_err(FileError::Stage)?;
    temp.write_all(contents.as_bytes()).map_err(FileError::Stage)?;
    temp.as_file().sync_all().map_err(FileError::Stage)?;
    fs::set_permissions(temp.path(), perms).map_err(FileError::Stage)?;

    Ok(StagedWrite { temp, target })
}

/// Stages and commits in one step.
pub fn replace(target: &Path, contents: &str) -> Result<(), FileError> {
    stage(target, contents)?.commit()
}
