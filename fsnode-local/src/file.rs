//! File handle

use crate::node::Node;
use crate::stream::FileStream;
use fsnode_core::{FsError, FsResult, NodeKind, NodePath, OpenMode};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A regular file that existed when the handle was bound.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct File {
    path: PathBuf,
}

impl File {
    /// Extension without the dot, empty when there is none.
    ///
    /// This is the text after the last dot of the name, as the OS reports it
    /// for a file known to exist: `backup.tar.gz` gives `gz` and a leading
    /// dot does not start an extension. [`NodePath::extension`] differs: it
    /// only answers for names with a single interior dot, since it is also
    /// what decides the kind of an unbound path.
    ///
    /// [`NodePath::extension`]: fsnode_core::NodePath::extension
    pub fn extension(&self) -> &str {
        self.path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
    }

    /// Final component, optionally without its extension.
    pub fn file_name(&self, with_extension: bool) -> String {
        let name = if with_extension {
            self.path.file_name()
        } else {
            self.path.file_stem()
        };
        name.map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Directory holding the file.
    pub fn file_dir(&self) -> &Path {
        self.path.parent().unwrap_or(&self.path)
    }

    pub fn open(&self, mode: OpenMode) -> FsResult<FileStream> {
        FileStream::open(&self.path, mode)
    }

    /// Open with an fopen-style mode string such as `"r+"`.
    pub fn open_str(&self, mode: &str) -> FsResult<FileStream> {
        self.open(OpenMode::parse(mode)?)
    }
}

impl Node for File {
    fn bind(path: impl AsRef<Path>) -> FsResult<Self> {
        let path = path.as_ref();
        let resolved = fs::canonicalize(path).map_err(|e| FsError::from_io(path, e))?;
        if resolved.is_dir() {
            return Err(FsError::NotAFile(resolved.display().to_string()));
        }
        Ok(Self { path: resolved })
    }

    fn create(path: &NodePath) -> FsResult<Self> {
        if path.is_dir() {
            return Err(FsError::NotAFile(path.to_string()));
        }
        fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|e| FsError::from_io(path, e))?;
        debug!(path = %path, "created file");
        Self::bind(path)
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn kind(&self) -> NodeKind {
        NodeKind::File
    }

    /// Overwrites `destination` if it exists.
    fn copy(&self, destination: &str) -> FsResult<Self> {
        let target = NodePath::file(destination)?;
        fs::copy(&self.path, &target).map_err(|e| FsError::from_io(&self.path, e))?;
        debug!(from = %self.path.display(), to = %target, "copied file");
        Self::bind(&target)
    }

    /// Overwrites `destination` if it exists.
    fn move_to(self, destination: &str) -> FsResult<Self> {
        let target = NodePath::file(destination)?;
        fs::rename(&self.path, &target).map_err(|e| FsError::from_io(&self.path, e))?;
        debug!(from = %self.path.display(), to = %target, "moved file");
        Self::bind(&target)
    }

    fn delete(&self) -> FsResult<bool> {
        fs::remove_file(&self.path).map_err(|e| FsError::from_io(&self.path, e))?;
        debug!(path = %self.path.display(), "deleted file");
        Ok(true)
    }
}

impl AsRef<Path> for File {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
