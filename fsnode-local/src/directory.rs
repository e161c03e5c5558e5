//! Directory handle

use crate::lister;
use crate::local::{DirectorySource, LocalSource};
use crate::node::Node;
use crate::recursive::RecursiveDirectory;
use crate::traverse::{ensure_contained, links_below};
use crate::tree;
use fsnode_core::{CopyOptions, Filter, FlattenedEntry, FsError, FsResult, NodeKind, NodePath};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A directory that existed when the handle was bound.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Directory {
    path: PathBuf,
}

impl Directory {
    pub fn dir_path(&self) -> &Path {
        &self.path
    }

    /// Immediate children passing `filter`, in OS order.
    pub fn list(&self, filter: Filter) -> FsResult<Vec<PathBuf>> {
        lister::list(&LocalSource, &self.path, filter)
    }

    pub fn entries(&self, filter: Filter) -> FsResult<Vec<FlattenedEntry>> {
        lister::list_entries(&LocalSource, &self.path, filter)
    }

    pub fn recursive(&self) -> RecursiveDirectory {
        RecursiveDirectory::new(self.path.clone())
    }

    /// Copy the whole subtree under `destination`.
    pub fn copy_with(&self, destination: &str, options: &CopyOptions) -> FsResult<Self> {
        let target = NodePath::directory(destination)?;
        let root = tree::copy_tree(&LocalSource, &self.path, &target, options)?;
        Ok(Self { path: root })
    }

    pub fn move_with(self, destination: &str, options: &CopyOptions) -> FsResult<Self> {
        let target = NodePath::directory(destination)?;
        let root = tree::move_tree(&LocalSource, &self.path, &target, options)?;
        Ok(Self { path: root })
    }
}

impl Node for Directory {
    fn bind(path: impl AsRef<Path>) -> FsResult<Self> {
        let path = path.as_ref();
        let resolved = fs::canonicalize(path).map_err(|e| FsError::from_io(path, e))?;
        if !resolved.is_dir() {
            return Err(FsError::NotADirectory(resolved.display().to_string()));
        }
        Ok(Self { path: resolved })
    }

    /// Creates missing parents too; an existing directory is reused.
    fn create(path: &NodePath) -> FsResult<Self> {
        if path.is_file() {
            return Err(FsError::NotADirectory(path.to_string()));
        }
        fs::create_dir_all(path).map_err(|e| FsError::from_io(path, e))?;
        debug!(path = %path, "created directory");
        Self::bind(path)
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Directory
    }

    fn copy(&self, destination: &str) -> FsResult<Self> {
        self.copy_with(destination, &CopyOptions::default())
    }

    fn move_to(self, destination: &str) -> FsResult<Self> {
        self.move_with(destination, &CopyOptions::default())
    }

    /// Removes direct files and empty direct subdirectories. Subdirectories
    /// with content are left alone; use [`RecursiveDirectory::delete`] for
    /// those.
    fn delete(&self) -> FsResult<bool> {
        let children = LocalSource.children(&self.path)?;
        ensure_contained(&children, &self.path)?;

        for link in links_below(&self.path, 1)? {
            fs::remove_file(&link).map_err(|e| FsError::from_io(&link, e))?;
            debug!(path = %link.display(), "removed link");
        }

        // a link's resolved target is only removed if it lives here too
        let mut seen = HashSet::new();
        let direct = children
            .iter()
            .filter(|c| c.path.parent() == Some(self.path.as_path()))
            .filter(|c| seen.insert(&c.path));
        for child in direct {
            match child.kind {
                NodeKind::File => {
                    fs::remove_file(&child.path).map_err(|e| FsError::from_io(&child.path, e))?;
                    debug!(path = %child.path.display(), "removed file");
                }
                NodeKind::Directory => {
                    let empty = fs::read_dir(&child.path)
                        .map_err(|e| FsError::from_io(&child.path, e))?
                        .next()
                        .is_none();
                    if empty {
                        fs::remove_dir(&child.path).map_err(|e| FsError::from_io(&child.path, e))?;
                        debug!(path = %child.path.display(), "removed directory");
                    } else {
                        warn!(path = %child.path.display(), "directory not empty, skipped");
                    }
                }
            }
        }
        Ok(true)
    }
}

impl AsRef<Path> for Directory {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for Directory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}
