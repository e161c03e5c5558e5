//! Pre-order depth-first flattening of a directory subtree

use crate::local::DirectorySource;
use fsnode_core::{Filter, FlattenedEntry, FsError, FsResult};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Every node below `root`, each directory immediately followed by its whole
/// subtree. Siblings keep the order reported by `source`.
///
/// Each resolved path is emitted once. A child that resolves to something
/// already emitted (a link to a sibling, or a cycle back to an ancestor) is
/// skipped.
pub fn flatten<S>(source: &S, root: &Path) -> FsResult<Vec<FlattenedEntry>>
where
    S: DirectorySource + ?Sized,
{
    let mut out = Vec::new();
    let mut seen = HashSet::new();
    seen.insert(root.to_path_buf());

    let mut stack = vec![source.children(root)?.into_iter()];
    while let Some(level) = stack.last_mut() {
        let Some(entry) = level.next() else {
            stack.pop();
            continue;
        };

        if !seen.insert(entry.path.clone()) {
            warn!(path = %entry.path.display(), "already listed, skipping");
            continue;
        }
        let descend = entry.is_directory().then(|| entry.path.clone());
        out.push(entry);

        if let Some(path) = descend {
            stack.push(source.children(&path)?.into_iter());
        }
    }

    Ok(out)
}

/// [`flatten`], then `filter` over the finished sequence.
pub fn list_recursive<S>(source: &S, root: &Path, filter: Filter) -> FsResult<Vec<FlattenedEntry>>
where
    S: DirectorySource + ?Sized,
{
    Ok(filter.apply(flatten(source, root)?))
}

/// Fails if any entry resolved outside `root`.
pub fn ensure_contained(entries: &[FlattenedEntry], root: &Path) -> FsResult<()> {
    match entries.iter().find(|e| !e.path.starts_with(root)) {
        Some(outside) => Err(FsError::InvalidPath(format!(
            "{} resolves outside {}",
            outside.path.display(),
            root.display()
        ))),
        None => Ok(()),
    }
}

/// Symbolic links at most `max_depth` levels below `root`, in walk order.
/// Links are reported as themselves and never followed.
pub fn links_below(root: &Path, max_depth: usize) -> FsResult<Vec<PathBuf>> {
    let mut out = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).max_depth(max_depth) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            FsError::inaccessible(path, io::Error::from(e))
        })?;
        if entry.path_is_symlink() {
            out.push(entry.into_path());
        }
    }
    Ok(out)
}

/// Order in which a flattened tree is removed: links unlinked first, then
/// files, then directories deepest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemovalPlan {
    pub links: Vec<PathBuf>,
    pub files: Vec<PathBuf>,
    pub directories: Vec<PathBuf>,
}

impl RemovalPlan {
    /// `entries` must be in pre-order; directories are taken in reverse so
    /// every child comes before its parent.
    pub fn from_entries(entries: &[FlattenedEntry]) -> Self {
        let files = entries
            .iter()
            .filter(|e| e.is_file())
            .map(|e| e.path.clone())
            .collect();
        let directories = entries
            .iter()
            .rev()
            .filter(|e| e.is_directory())
            .map(|e| e.path.clone())
            .collect();
        Self {
            links: Vec::new(),
            files,
            directories,
        }
    }

    /// Links to unlink before anything else. The flattened entries only
    /// carry resolved targets, so the links themselves come from here.
    pub fn with_links(mut self, links: Vec<PathBuf>) -> Self {
        self.links = links;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty() && self.files.is_empty() && self.directories.is_empty()
    }

    pub fn execute(&self) -> FsResult<()> {
        for link in &self.links {
            fs::remove_file(link).map_err(|e| FsError::from_io(link, e))?;
            debug!(path = %link.display(), "removed link");
        }
        for file in &self.files {
            fs::remove_file(file).map_err(|e| FsError::from_io(file, e))?;
            debug!(path = %file.display(), "removed file");
        }
        for dir in &self.directories {
            fs::remove_dir(dir).map_err(|e| FsError::from_io(dir, e))?;
            debug!(path = %dir.display(), "removed directory");
        }
        Ok(())
    }
}
