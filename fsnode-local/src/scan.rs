//! Plain-path helpers that skip the handle types
//!
//! Unlike [`crate::Directory::list`], results here are sorted by file name
//! and children are joined onto the resolved directory without resolving
//! them individually.

use crate::local::LocalSource;
use crate::tree;
use fsnode_core::{FsError, FsResult};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

fn resolve_dir(path: &Path) -> FsResult<PathBuf> {
    if !path.is_dir() {
        return Err(FsError::NotADirectory(path.display().to_string()));
    }
    fs::canonicalize(path).map_err(|e| FsError::from_io(path, e))
}

fn walk(root: &Path, max_depth: usize) -> FsResult<Vec<PathBuf>> {
    let mut out = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            FsError::inaccessible(path, io::Error::from(e))
        })?;
        out.push(entry.into_path());
    }
    Ok(out)
}

/// Immediate children of `path`.
pub fn scan(path: impl AsRef<Path>) -> FsResult<Vec<PathBuf>> {
    let root = resolve_dir(path.as_ref())?;
    walk(&root, 1)
}

/// Every node below `path`, each directory followed by its contents.
pub fn scan_recursive(path: impl AsRef<Path>) -> FsResult<Vec<PathBuf>> {
    let root = resolve_dir(path.as_ref())?;
    walk(&root, usize::MAX)
}

/// Entries of `list` that are files on disk right now.
pub fn only_files(list: &[PathBuf]) -> Vec<PathBuf> {
    list.iter().filter(|p| p.is_file()).cloned().collect()
}

/// Entries of `list` that are directories on disk right now.
pub fn only_dirs(list: &[PathBuf]) -> Vec<PathBuf> {
    list.iter().filter(|p| p.is_dir()).cloned().collect()
}

/// Delete `path` and everything under it.
pub fn remove_dir_all(path: impl AsRef<Path>) -> FsResult<()> {
    let root = resolve_dir(path.as_ref())?;
    tree::remove_contents(&LocalSource, &root)?;
    fs::remove_dir(&root).map_err(|e| FsError::from_io(&root, e))?;
    debug!(path = %root.display(), "removed directory tree");
    Ok(())
}
