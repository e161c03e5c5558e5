//! Handles over existing filesystem entries

use crate::directory::Directory;
use crate::file::File;
use fsnode_core::{FsError, FsResult, Metadata, NodeKind, NodePath};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Operations common to [`File`] and [`Directory`].
///
/// A handle holds the canonical path it was bound to and nothing else. If the
/// entry disappears, later calls fail with the OS error rather than being
/// ignored.
pub trait Node: Sized {
    /// Bind to an entry that already exists.
    fn bind(path: impl AsRef<Path>) -> FsResult<Self>;

    /// Create the entry, then bind to it.
    fn create(path: &NodePath) -> FsResult<Self>;

    fn path(&self) -> &Path;

    fn kind(&self) -> NodeKind;

    /// Copy to `destination` and return a handle to the copy.
    fn copy(&self, destination: &str) -> FsResult<Self>;

    /// Move to `destination`. The old handle is consumed.
    fn move_to(self, destination: &str) -> FsResult<Self>;

    fn delete(&self) -> FsResult<bool>;

    /// Move next to the current entry under `new_name`.
    fn rename(self, new_name: &str) -> FsResult<Self> {
        let target = sibling_of(self.path(), new_name)?;
        self.move_to(&target)
    }

    fn parent(&self) -> PathBuf {
        self.path()
            .parent()
            .unwrap_or_else(|| self.path())
            .to_path_buf()
    }

    fn exists(&self) -> bool {
        self.path().exists()
    }

    fn metadata(&self) -> FsResult<Metadata> {
        let meta = fs::metadata(self.path()).map_err(|e| FsError::from_io(self.path(), e))?;
        Ok(Metadata::from(&meta))
    }
}

/// `new_name` resolved against the parent of `path`.
pub(crate) fn sibling_of(path: &Path, new_name: &str) -> FsResult<String> {
    if new_name.is_empty() {
        return Err(FsError::InvalidPath("empty name".into()));
    }
    let parent = path.parent().unwrap_or(path);
    let target = parent.join(new_name);
    target
        .to_str()
        .map(str::to_string)
        .ok_or_else(|| FsError::InvalidPath(target.display().to_string()))
}

/// Either kind of handle, picked from what is actually on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnyNode {
    File(File),
    Directory(Directory),
}

impl AnyNode {
    pub fn bind(path: impl AsRef<Path>) -> FsResult<Self> {
        let path = path.as_ref();
        let meta = fs::metadata(path).map_err(|e| FsError::from_io(path, e))?;
        match NodeKind::of(&meta) {
            NodeKind::File => File::bind(path).map(AnyNode::File),
            NodeKind::Directory => Directory::bind(path).map(AnyNode::Directory),
        }
    }

    /// Create a file or a directory according to the path's kind.
    pub fn create(path: &NodePath) -> FsResult<Self> {
        match path.kind() {
            NodeKind::File => File::create(path).map(AnyNode::File),
            NodeKind::Directory => Directory::create(path).map(AnyNode::Directory),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            AnyNode::File(f) => f.path(),
            AnyNode::Directory(d) => d.path(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            AnyNode::File(_) => NodeKind::File,
            AnyNode::Directory(_) => NodeKind::Directory,
        }
    }

    pub fn metadata(&self) -> FsResult<Metadata> {
        match self {
            AnyNode::File(f) => f.metadata(),
            AnyNode::Directory(d) => d.metadata(),
        }
    }

    pub fn delete(&self) -> FsResult<bool> {
        match self {
            AnyNode::File(f) => f.delete(),
            AnyNode::Directory(d) => d.delete(),
        }
    }
}

impl fmt::Display for AnyNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path().display())
    }
}

/// Classify `path`, then create it as a file or a directory.
pub fn create_node(path: &str) -> FsResult<AnyNode> {
    AnyNode::create(&NodePath::parse(path)?)
}
