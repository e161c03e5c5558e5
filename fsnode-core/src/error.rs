//! Error types for fsnode

use std::io;
use std::path::Path;
use thiserror::Error;

/// Result type alias
pub type FsResult<T> = Result<T, FsError>;

/// Main error type
#[derive(Error, Debug)]
pub enum FsError {
    #[error("Path not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Inaccessible: {path}: {source}")]
    Inaccessible {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Ambiguous classification: {0}")]
    AmbiguousClassification(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Not a file: {0}")]
    NotAFile(String),

    #[error("Invalid open mode: {0}")]
    InvalidMode(String),

    #[error("Not readable: {0}")]
    NotReadable(String),

    #[error("Not writable: {0}")]
    NotWritable(String),

    #[error("Copy incomplete: {failed} entries failed, first: {first}")]
    CopyIncomplete { failed: usize, first: Box<FsError> },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl FsError {
    /// Map an OS error raised while operating on `path`.
    pub fn from_io(path: impl AsRef<Path>, err: io::Error) -> Self {
        let path = path.as_ref().display().to_string();
        match err.kind() {
            io::ErrorKind::NotFound => FsError::NotFound(path),
            io::ErrorKind::AlreadyExists => FsError::AlreadyExists(path),
            _ => FsError::Inaccessible { path, source: err },
        }
    }

    pub fn inaccessible(path: impl AsRef<Path>, err: io::Error) -> Self {
        FsError::Inaccessible {
            path: path.as_ref().display().to_string(),
            source: err,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FsError::NotFound(_))
    }

    pub fn is_classification_error(&self) -> bool {
        matches!(
            self,
            FsError::AmbiguousClassification(_) | FsError::InvalidPath(_)
        )
    }
}
