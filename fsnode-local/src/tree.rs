//! Whole-subtree copy, move and removal
//!
//! None of these are transactional: on failure whatever was already done
//! stays done.

use crate::local::DirectorySource;
use crate::traverse::{ensure_contained, flatten, links_below, RemovalPlan};
use fsnode_core::{CopyOptions, ErrorPolicy, FlattenedEntry, FsError, FsResult, NodeKind, NodePath};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Rewrite `path` from under `source_root` to under `dest_root`.
pub fn rebase(path: &Path, source_root: &Path, dest_root: &Path) -> FsResult<PathBuf> {
    let relative = path.strip_prefix(source_root).map_err(|_| {
        FsError::InvalidPath(format!(
            "{} is not under {}",
            path.display(),
            source_root.display()
        ))
    })?;
    Ok(dest_root.join(relative))
}

fn resolve_root(root: &Path) -> FsResult<PathBuf> {
    fs::canonicalize(root).map_err(|e| FsError::from_io(root, e))
}

/// Replicate everything below `source_root` under `destination`, creating it
/// once the source has been listed. Returns the canonical destination root.
pub fn copy_tree<S>(
    source: &S,
    source_root: &Path,
    destination: &NodePath,
    options: &CopyOptions,
) -> FsResult<PathBuf>
where
    S: DirectorySource + ?Sized,
{
    let source_root = &resolve_root(source_root)?;
    let entries = flatten(source, source_root)?;
    ensure_contained(&entries, source_root)?;

    let dest = destination.to_path_buf();
    let existed = dest.exists();
    fs::create_dir_all(&dest).map_err(|e| FsError::inaccessible(&dest, e))?;
    let dest_root = fs::canonicalize(&dest).map_err(|e| FsError::inaccessible(&dest, e))?;

    if dest_root.starts_with(source_root) {
        if !existed {
            if let Err(e) = fs::remove_dir(&dest_root) {
                warn!(path = %dest_root.display(), error = %e, "could not remove rejected destination");
            }
        }
        return Err(FsError::InvalidPath(format!(
            "destination {} is inside {}",
            dest_root.display(),
            source_root.display()
        )));
    }

    debug!(
        source = %source_root.display(),
        destination = %dest_root.display(),
        entries = entries.len(),
        "copying tree"
    );

    let mut failed = 0;
    let mut first = None;
    for entry in &entries {
        if let Err(err) = copy_entry(entry, source_root, &dest_root) {
            match options.on_error {
                ErrorPolicy::FailFast => return Err(err),
                ErrorPolicy::Continue => {
                    warn!(path = %entry.path.display(), error = %err, "copy failed, continuing");
                    failed += 1;
                    first.get_or_insert(err);
                }
            }
        }
    }

    match first {
        Some(first) => Err(FsError::CopyIncomplete {
            failed,
            first: Box::new(first),
        }),
        None => Ok(dest_root),
    }
}

fn copy_entry(entry: &FlattenedEntry, source_root: &Path, dest_root: &Path) -> FsResult<()> {
    let target = rebase(&entry.path, source_root, dest_root)?;
    match entry.kind {
        NodeKind::Directory => {
            fs::create_dir_all(&target).map_err(|e| FsError::inaccessible(&target, e))?;
        }
        NodeKind::File => {
            // normally already made by the pre-order pass
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| FsError::inaccessible(parent, e))?;
            }
            fs::copy(&entry.path, &target).map_err(|e| FsError::from_io(&entry.path, e))?;
        }
    }
    debug!(from = %entry.path.display(), to = %target.display(), "copied");
    Ok(())
}

/// Remove everything below `root`, leaving `root` itself. Links inside the
/// tree are unlinked rather than followed.
pub fn remove_contents<S>(source: &S, root: &Path) -> FsResult<()>
where
    S: DirectorySource + ?Sized,
{
    let root = &resolve_root(root)?;
    let entries = flatten(source, root)?;
    ensure_contained(&entries, root)?;
    RemovalPlan::from_entries(&entries)
        .with_links(links_below(root, usize::MAX)?)
        .execute()
}

/// [`copy_tree`], then remove the source. The source is only touched once
/// the copy has succeeded.
pub fn move_tree<S>(
    source: &S,
    source_root: &Path,
    destination: &NodePath,
    options: &CopyOptions,
) -> FsResult<PathBuf>
where
    S: DirectorySource + ?Sized,
{
    let source_root = &resolve_root(source_root)?;
    let dest_root = copy_tree(source, source_root, destination, options)?;
    remove_contents(source, source_root)?;
    fs::remove_dir(source_root).map_err(|e| FsError::from_io(source_root, e))?;
    debug!(from = %source_root.display(), to = %dest_root.display(), "moved tree");
    Ok(dest_root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local::LocalSource;
    use crate::traverse::list_recursive;
    use fsnode_core::Filter;

    fn build_tree(root: &Path) {
        fs::create_dir_all(root.join("subdir1")).unwrap();
        fs::create_dir_all(root.join("subdir2")).unwrap();
        for f in ["file1.txt", "file2.txt", "file3.txt", "subdir1/file11.txt", "subdir1/file12.txt"] {
            fs::write(root.join(f), b"teste").unwrap();
        }
    }

    fn relative(entries: &[FlattenedEntry], root: &Path) -> Vec<PathBuf> {
        let mut rel: Vec<PathBuf> = entries
            .iter()
            .map(|e| e.path.strip_prefix(root).unwrap().to_path_buf())
            .collect();
        rel.sort();
        rel
    }

    fn dest_path(path: &Path) -> NodePath {
        NodePath::from_path(path, NodeKind::Directory).unwrap()
    }

    #[test]
    fn test_rebase() {
        let out = rebase(Path::new("/src/a/b.txt"), Path::new("/src"), Path::new("/dst")).unwrap();
        assert_eq!(out, PathBuf::from("/dst/a/b.txt"));

        assert!(rebase(Path::new("/other/x"), Path::new("/src"), Path::new("/dst")).is_err());
    }

    #[test]
    fn test_copy_tree_replicates_structure() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("test");
        build_tree(&src);
        let src = fs::canonicalize(&src).unwrap();

        let dest = copy_tree(&LocalSource, &src, &dest_path(&tmp.path().join("copy")), &CopyOptions::default()).unwrap();

        let original = list_recursive(&LocalSource, &src, Filter::All).unwrap();
        let copied = list_recursive(&LocalSource, &dest, Filter::All).unwrap();
        assert_eq!(relative(&original, &src), relative(&copied, &dest));
        assert_eq!(fs::read(dest.join("subdir1/file12.txt")).unwrap(), b"teste");
        assert!(src.join("file1.txt").exists());
    }

    #[test]
    fn test_copy_into_existing_destination() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("src");
        build_tree(&src);
        let src = fs::canonicalize(&src).unwrap();
        let dest = tmp.path().join("dest");
        fs::create_dir(&dest).unwrap();
        fs::write(dest.join("file1.txt"), b"old").unwrap();

        let dest = copy_tree(&LocalSource, &src, &dest_path(&dest), &CopyOptions::default()).unwrap();
        assert_eq!(fs::read(dest.join("file1.txt")).unwrap(), b"teste");
    }

    #[test]
    fn test_copy_into_itself_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("src");
        build_tree(&src);
        let src = fs::canonicalize(&src).unwrap();

        let err = copy_tree(&LocalSource, &src, &dest_path(&src.join("inner")), &CopyOptions::default()).unwrap_err();
        assert!(matches!(err, FsError::InvalidPath(_)));
        assert!(!src.join("inner").exists());
    }

    #[test]
    fn test_source_root_with_parent_segment() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("src");
        build_tree(&src);
        let spelled = src.join("subdir1").join("..");
        let canonical = fs::canonicalize(&src).unwrap();
        let original = list_recursive(&LocalSource, &canonical, Filter::All).unwrap();

        let dest = copy_tree(&LocalSource, &spelled, &dest_path(&tmp.path().join("copy")), &CopyOptions::default()).unwrap();
        let copied = list_recursive(&LocalSource, &dest, Filter::All).unwrap();
        assert_eq!(relative(&original, &canonical), relative(&copied, &dest));

        remove_contents(&LocalSource, &spelled).unwrap();
        assert!(canonical.is_dir());
        assert!(fs::read_dir(&canonical).unwrap().next().is_none());
    }

    #[test]
    fn test_missing_source_creates_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("dest");

        let err = copy_tree(&LocalSource, &tmp.path().join("nope"), &dest_path(&dest), &CopyOptions::default()).unwrap_err();
        assert!(err.is_not_found());
        assert!(!dest.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_remove_contents_unlinks_internal_links() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("t");
        fs::create_dir_all(src.join("real")).unwrap();
        fs::write(src.join("real/f.txt"), b"f").unwrap();
        fs::write(src.join("g.txt"), b"g").unwrap();
        std::os::unix::fs::symlink(src.join("g.txt"), src.join("link_to_g")).unwrap();
        std::os::unix::fs::symlink(src.join("real"), src.join("real/back")).unwrap();

        let listed = list_recursive(&LocalSource, &src, Filter::All).unwrap();
        assert_eq!(listed.len(), 3);

        remove_contents(&LocalSource, &src).unwrap();
        assert!(src.is_dir());
        assert!(fs::read_dir(&src).unwrap().next().is_none());
    }

    #[test]
    fn test_fail_fast_leaves_partial_copy() {
        let tmp = tempfile::tempdir().unwrap();
        let root = fs::canonicalize(tmp.path()).unwrap();
        let src = root.join("src");
        fs::create_dir(&src).unwrap();

        // the listing names a file that is not on disk
        let mut source = crate::memory::MemorySource::with_root(&src);
        fs::write(src.join("a.txt"), b"a").unwrap();
        source.add_file(src.join("a.txt")).add_file(src.join("missing.txt")).add_dir(src.join("later"));

        let err = copy_tree(&source, &src, &dest_path(&root.join("dest")), &CopyOptions::default()).unwrap_err();
        assert!(err.is_not_found());
        assert!(root.join("dest/a.txt").exists());
        assert!(!root.join("dest/later").exists());
    }

    #[test]
    fn test_continue_reports_failures_after_copying_rest() {
        let tmp = tempfile::tempdir().unwrap();
        let root = fs::canonicalize(tmp.path()).unwrap();
        let src = root.join("src");
        fs::create_dir(&src).unwrap();
        fs::write(src.join("a.txt"), b"a").unwrap();

        let mut source = crate::memory::MemorySource::with_root(&src);
        source
            .add_file(src.join("missing1.txt"))
            .add_file(src.join("a.txt"))
            .add_file(src.join("missing2.txt"))
            .add_dir(src.join("later"));

        let err = copy_tree(&source, &src, &dest_path(&root.join("dest")), &CopyOptions::keep_going()).unwrap_err();
        match err {
            FsError::CopyIncomplete { failed, first } => {
                assert_eq!(failed, 2);
                assert!(first.is_not_found());
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(root.join("dest/a.txt").exists());
        assert!(root.join("dest/later").is_dir());
    }

    #[test]
    fn test_remove_contents_keeps_root() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("test");
        build_tree(&src);
        let src = fs::canonicalize(&src).unwrap();

        remove_contents(&LocalSource, &src).unwrap();
        assert!(src.is_dir());
        assert!(list_recursive(&LocalSource, &src, Filter::All).unwrap().is_empty());
    }

    #[test]
    fn test_move_tree() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("test");
        build_tree(&src);
        let src = fs::canonicalize(&src).unwrap();
        let before = list_recursive(&LocalSource, &src, Filter::All).unwrap();
        let before = relative(&before, &src);

        let dest = move_tree(&LocalSource, &src, &dest_path(&tmp.path().join("moved")), &CopyOptions::default()).unwrap();

        assert!(!src.exists());
        let after = list_recursive(&LocalSource, &dest, Filter::All).unwrap();
        assert_eq!(relative(&after, &dest), before);
    }

    #[test]
    fn test_failed_copy_keeps_source_on_move() {
        let tmp = tempfile::tempdir().unwrap();
        let root = fs::canonicalize(tmp.path()).unwrap();
        let src = root.join("src");
        fs::create_dir(&src).unwrap();
        fs::write(src.join("a.txt"), b"a").unwrap();

        let mut source = crate::memory::MemorySource::with_root(&src);
        source.add_file(src.join("a.txt")).add_file(src.join("ghost.txt"));

        assert!(move_tree(&source, &src, &dest_path(&root.join("dest")), &CopyOptions::default()).is_err());
        assert!(src.join("a.txt").exists());
    }
}
