//! Normalised path abstraction

use crate::classify::{
    final_segment, is_separator, join_path, normalize_separators, segment_extension, DotHeuristic,
    PathClassifier, SEPARATOR,
};
use crate::entry::NodeKind;
use crate::error::{FsError, FsResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// A path string with platform separators and a known kind.
///
/// Directories always end with a separator, files never do. Building one does
/// not touch the filesystem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodePath {
    path: String,
    kind: NodeKind,
}

impl NodePath {
    /// Classify and normalise with [`DotHeuristic`].
    pub fn parse(path: impl AsRef<str>) -> FsResult<Self> {
        Self::parse_with(&DotHeuristic, path)
    }

    pub fn parse_with<C>(classifier: &C, path: impl AsRef<str>) -> FsResult<Self>
    where
        C: PathClassifier + ?Sized,
    {
        let path = path.as_ref();
        let kind = classifier.classify(path)?;
        Self::with_kind(path, kind)
    }

    /// Join pieces with the platform separator, then [`NodePath::parse`].
    pub fn join<I, S>(pieces: I) -> FsResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::parse(join_path(pieces))
    }

    pub fn file(path: impl AsRef<str>) -> FsResult<Self> {
        Self::with_kind(path.as_ref(), NodeKind::File)
    }

    pub fn directory(path: impl AsRef<str>) -> FsResult<Self> {
        Self::with_kind(path.as_ref(), NodeKind::Directory)
    }

    /// Normalise `path` as a node of `kind`, whatever its text suggests.
    pub fn with_kind(path: &str, kind: NodeKind) -> FsResult<Self> {
        if path.is_empty() {
            return Err(FsError::InvalidPath("empty path".into()));
        }

        let mut normalized = normalize_separators(path);
        match kind {
            NodeKind::Directory => {
                if !normalized.ends_with(SEPARATOR) {
                    normalized.push(SEPARATOR);
                }
            }
            NodeKind::File => {
                let len = normalized.trim_end_matches(SEPARATOR).len();
                if len == 0 {
                    return Err(FsError::InvalidPath(path.to_string()));
                }
                normalized.truncate(len);
            }
        }

        Ok(Self {
            path: normalized,
            kind,
        })
    }

    pub fn from_path(path: &Path, kind: NodeKind) -> FsResult<Self> {
        let text = path
            .to_str()
            .ok_or_else(|| FsError::InvalidPath(path.display().to_string()))?;
        Self::with_kind(text, kind)
    }

    pub fn as_str(&self) -> &str {
        &self.path
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_dir(&self) -> bool {
        self.kind.is_directory()
    }

    pub fn is_file(&self) -> bool {
        self.kind.is_file()
    }

    /// Final segment without the trailing separator.
    pub fn name(&self) -> Option<&str> {
        let name = final_segment(self.path.trim_end_matches(is_separator));
        (!name.is_empty()).then_some(name)
    }

    /// Extension without the dot, empty when the file has none.
    pub fn extension(&self) -> FsResult<&str> {
        if self.is_dir() {
            return Err(FsError::NotAFile(self.path.clone()));
        }
        Ok(self.name().and_then(segment_extension).unwrap_or(""))
    }

    /// Textual parent, always a directory.
    pub fn parent(&self) -> Option<NodePath> {
        let trimmed = self.path.trim_end_matches(SEPARATOR);
        let cut = trimmed.rfind(SEPARATOR)?;
        Some(Self {
            path: trimmed[..=cut].to_string(),
            kind: NodeKind::Directory,
        })
    }

    pub fn to_path_buf(&self) -> PathBuf {
        PathBuf::from(&self.path)
    }

    pub fn exists(&self) -> bool {
        Path::new(&self.path).exists()
    }

    /// Canonical absolute path of an existing entry.
    pub fn real_path(&self) -> FsResult<PathBuf> {
        std::fs::canonicalize(&self.path).map_err(|e| FsError::from_io(&self.path, e))
    }
}

impl AsRef<Path> for NodePath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.path)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// Normalise with the default heuristic.
pub fn normalize(path: &str) -> FsResult<NodePath> {
    NodePath::parse(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::TrailingSeparator;

    const SAMPLE_DIR: [&str; 3] = ["tests", "cache", "subdir"];
    const SAMPLE_FILE: [&str; 4] = ["tests", "cache", "subdir", "sample.file"];

    #[test]
    fn test_join_directory() {
        let path = NodePath::join(SAMPLE_DIR).unwrap();
        let expected = format!("{}{}", join_path(SAMPLE_DIR), SEPARATOR);
        assert_eq!(path.as_str(), expected);
        assert!(path.is_dir());
    }

    #[test]
    fn test_join_file() {
        let path = NodePath::join(SAMPLE_FILE).unwrap();
        assert_eq!(path.as_str(), join_path(SAMPLE_FILE));
        assert!(path.is_file());
        assert!(!path.is_dir());
    }

    #[test]
    fn test_normalize_idempotent() {
        for raw in [
            "a/b",
            "a/b/",
            "a\\b\\c.txt",
            "/mnt\\c\\dirname",
            "x",
            ".hidden",
            "archive.old",
            "/",
            "a//b//",
        ] {
            let once = normalize(raw).unwrap();
            let twice = normalize(once.as_str()).unwrap();
            assert_eq!(once, twice, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn test_normalize_rejects() {
        assert!(normalize("").is_err());
        assert!(normalize("a/file.tar.gz").unwrap_err().is_classification_error());
    }

    #[test]
    fn test_separators_replaced() {
        let path = normalize("/mnt\\c/dirname").unwrap();
        let expected = format!("{s}mnt{s}c{s}dirname{s}", s = SEPARATOR);
        assert_eq!(path.as_str(), expected);
    }

    #[test]
    fn test_extension() {
        let path = NodePath::join(SAMPLE_FILE).unwrap();
        assert_eq!(path.extension().unwrap(), "file");

        let dir = NodePath::join(SAMPLE_DIR).unwrap();
        assert!(matches!(dir.extension(), Err(FsError::NotAFile(_))));

        let path = NodePath::parse("this/is/problematic.path/file.ext").unwrap();
        assert_eq!(path.extension().unwrap(), "ext");

        let bare = NodePath::file("README").unwrap();
        assert_eq!(bare.extension().unwrap(), "");
    }

    #[test]
    fn test_explicit_kinds() {
        let dir = NodePath::directory("backups/archive.old").unwrap();
        assert!(dir.is_dir());
        assert!(dir.as_str().ends_with(SEPARATOR));

        let file = NodePath::file("data/notes/").unwrap();
        assert!(file.is_file());
        assert_eq!(file.name(), Some("notes"));

        assert!(NodePath::file("/").is_err());
    }

    #[test]
    fn test_parse_with_strict_classifier() {
        let path = NodePath::parse_with(&TrailingSeparator, "bin/tool").unwrap();
        assert!(path.is_file());
        let path = NodePath::parse_with(&TrailingSeparator, "dist/file.tar.gz").unwrap();
        assert_eq!(path.name(), Some("file.tar.gz"));
    }

    #[test]
    fn test_name_and_parent() {
        let path = NodePath::parse("/home/user/docs").unwrap();
        assert_eq!(path.name(), Some("docs"));

        let parent = path.parent().unwrap();
        assert!(parent.is_dir());
        assert_eq!(parent.name(), Some("user"));

        let file = NodePath::parse("notes.txt").unwrap();
        assert!(file.parent().is_none());
    }

    #[test]
    fn test_exists_and_real_path() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("present.txt");
        std::fs::write(&file, b"x").unwrap();

        let path = NodePath::from_path(&file, NodeKind::File).unwrap();
        assert!(path.exists());
        assert_eq!(path.real_path().unwrap(), std::fs::canonicalize(&file).unwrap());

        let missing = NodePath::from_path(&dir.path().join("missing.txt"), NodeKind::File).unwrap();
        assert!(!missing.exists());
        assert!(missing.real_path().unwrap_err().is_not_found());
    }

    #[test]
    fn test_display() {
        let path = NodePath::parse("a/b.txt").unwrap();
        assert_eq!(format!("{}", path), path.as_str());
    }
}
