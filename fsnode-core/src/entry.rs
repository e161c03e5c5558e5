//! File system entries

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Node kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Directory,
}

impl NodeKind {
    /// Kind reported by the OS for an existing entry. Anything that is not a
    /// directory counts as a file.
    pub fn of(meta: &std::fs::Metadata) -> Self {
        if meta.is_dir() {
            NodeKind::Directory
        } else {
            NodeKind::File
        }
    }

    pub fn is_file(self) -> bool {
        self == NodeKind::File
    }

    pub fn is_directory(self) -> bool {
        self == NodeKind::Directory
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::File => f.write_str("file"),
            NodeKind::Directory => f.write_str("directory"),
        }
    }
}

/// One node discovered while walking a directory tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlattenedEntry {
    /// Canonical absolute path
    pub path: PathBuf,
    pub kind: NodeKind,
}

impl FlattenedEntry {
    pub fn new(path: impl Into<PathBuf>, kind: NodeKind) -> Self {
        Self { path: path.into(), kind }
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::new(path, NodeKind::File)
    }

    pub fn directory(path: impl Into<PathBuf>) -> Self {
        Self::new(path, NodeKind::Directory)
    }

    pub fn is_file(&self) -> bool {
        self.kind.is_file()
    }

    pub fn is_directory(&self) -> bool {
        self.kind.is_directory()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }
}
