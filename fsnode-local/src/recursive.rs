//! Whole-subtree view of a directory

use crate::directory::Directory;
use crate::local::LocalSource;
use crate::node::Node;
use crate::traverse;
use crate::tree;
use fsnode_core::{Filter, FlattenedEntry, FsResult};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Recursive listing and deletion rooted at one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecursiveDirectory {
    root: PathBuf,
}

impl RecursiveDirectory {
    /// `root` is expected to be canonical, as handed out by [`Directory`].
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Bind `path` as a directory first.
    pub fn open(path: impl AsRef<Path>) -> FsResult<Self> {
        Directory::bind(path).map(|dir| dir.recursive())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every node below the root in pre-order, then filtered.
    pub fn list(&self, filter: Filter) -> FsResult<Vec<PathBuf>> {
        Ok(self.entries(filter)?.into_iter().map(|e| e.path).collect())
    }

    pub fn entries(&self, filter: Filter) -> FsResult<Vec<FlattenedEntry>> {
        traverse::list_recursive(&LocalSource, &self.root, filter)
    }

    /// Lazy walk of the same subtree, root excluded.
    pub fn walker(&self) -> WalkDir {
        WalkDir::new(&self.root).min_depth(1)
    }

    /// Remove everything below the root. The root stays.
    pub fn delete(&self) -> FsResult<bool> {
        tree::remove_contents(&LocalSource, &self.root)?;
        Ok(true)
    }
}
