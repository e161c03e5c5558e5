//! In-memory directory source with a fixed enumeration order

use crate::local::DirectorySource;
use fsnode_core::{FlattenedEntry, FsError, FsResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Children are reported in the order they were added.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    children: HashMap<PathBuf, Vec<FlattenedEntry>>,
}

impl MemorySource {
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        let mut children = HashMap::new();
        children.insert(root.into(), Vec::new());
        Self { children }
    }

    pub fn add_file(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.add(FlattenedEntry::file(path))
    }

    pub fn add_dir(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        let path = path.into();
        self.children.entry(path.clone()).or_default();
        self.add(FlattenedEntry::directory(path))
    }

    fn add(&mut self, entry: FlattenedEntry) -> &mut Self {
        let parent = entry.path.parent().map(Path::to_path_buf).unwrap_or_default();
        self.children.entry(parent).or_default().push(entry);
        self
    }
}

impl DirectorySource for MemorySource {
    fn children(&self, dir: &Path) -> FsResult<Vec<FlattenedEntry>> {
        self.children
            .get(dir)
            .cloned()
            .ok_or_else(|| FsError::NotFound(dir.display().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_is_kept() {
        let mut source = MemorySource::with_root("/t");
        source.add_file("/t/b").add_file("/t/a").add_dir("/t/c");

        let names: Vec<_> = source
            .children(Path::new("/t"))
            .unwrap()
            .into_iter()
            .map(|e| e.path)
            .collect();
        assert_eq!(names, vec![PathBuf::from("/t/b"), PathBuf::from("/t/a"), PathBuf::from("/t/c")]);
        assert!(source.children(Path::new("/t/c")).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_dir_is_not_found() {
        let source = MemorySource::with_root("/t");
        assert!(source.children(Path::new("/u")).unwrap_err().is_not_found());
    }
}
