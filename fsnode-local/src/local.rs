//! Local filesystem enumeration

use fsnode_core::{FlattenedEntry, FsError, FsResult, NodeKind};
use std::fs;
use std::path::Path;
use tracing::trace;

/// Produces the immediate children of a directory.
///
/// Order is whatever the source reports; callers must not assume it is
/// sorted.
pub trait DirectorySource {
    fn children(&self, dir: &Path) -> FsResult<Vec<FlattenedEntry>>;
}

impl<S: DirectorySource + ?Sized> DirectorySource for &S {
    fn children(&self, dir: &Path) -> FsResult<Vec<FlattenedEntry>> {
        (**self).children(dir)
    }
}

/// The OS filesystem, in `read_dir` order.
///
/// Every child is reported by its canonical path. A child that cannot be
/// resolved aborts the whole listing.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSource;

impl DirectorySource for LocalSource {
    fn children(&self, dir: &Path) -> FsResult<Vec<FlattenedEntry>> {
        let read_dir = fs::read_dir(dir).map_err(|e| FsError::from_io(dir, e))?;

        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| FsError::inaccessible(dir, e))?;
            let name = entry.file_name();
            if name == "." || name == ".." {
                continue;
            }

            let raw = entry.path();
            let resolved = fs::canonicalize(&raw).map_err(|e| FsError::inaccessible(&raw, e))?;
            let meta = fs::metadata(&resolved).map_err(|e| FsError::inaccessible(&resolved, e))?;
            let kind = NodeKind::of(&meta);

            trace!(path = %resolved.display(), %kind, "listed child");
            entries.push(FlattenedEntry::new(resolved, kind));
        }

        Ok(entries)
    }
}
