use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Setup failures. Any of these aborts the run before a single file is touched.
#[derive(Debug, Error)]
pub enum ApplyError {
    #[error("directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("directory unreadable: {}: {reason}", path.display())]
    DirectoryUnreadable { path: PathBuf, reason: String },

    #[error("invalid glob pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: ignore::Error,
    },

    #[error("marker must not be empty")]
    EmptyMarker,

    #[error("block does not contain the marker {0:?}; a re-run would append it again")]
    BlockMissingMarker(String),
}

/// A failure confined to one file. Recorded in the summary, never raised.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("read failed: {0}")]
    Read(#[source] io::Error),

    #[error("not a text file")]
    NotText,

    #[error("file is read-only")]
    ReadOnly,

    #[error("staging new content failed: {0}")]
    Stage(#[source] io::Error),

    #[error("replacing file failed: {0}")]
    Commit(#[source] io::Error),
}
