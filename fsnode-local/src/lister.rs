//! Non-recursive directory listing

use crate::local::DirectorySource;
use fsnode_core::{Filter, FlattenedEntry, FsResult};
use std::path::{Path, PathBuf};

/// Immediate children of `dir` that pass `filter`, in source order.
pub fn list_entries<S>(source: &S, dir: &Path, filter: Filter) -> FsResult<Vec<FlattenedEntry>>
where
    S: DirectorySource + ?Sized,
{
    Ok(filter.apply(source.children(dir)?))
}

/// Like [`list_entries`], paths only.
pub fn list<S>(source: &S, dir: &Path, filter: Filter) -> FsResult<Vec<PathBuf>>
where
    S: DirectorySource + ?Sized,
{
    Ok(list_entries(source, dir, filter)?
        .into_iter()
        .map(|e| e.path)
        .collect())
}
