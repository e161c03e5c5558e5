//! File and directory metadata

use crate::entry::NodeKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of an entry's OS metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    pub kind: NodeKind,
    pub size: u64,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
    pub accessed: Option<DateTime<Utc>>,
    pub readonly: bool,
}

impl Metadata {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            size: 0,
            created: None,
            modified: None,
            accessed: None,
            readonly: false,
        }
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    pub fn with_modified(mut self, modified: DateTime<Utc>) -> Self {
        self.modified = Some(modified);
        self
    }
}

impl From<&std::fs::Metadata> for Metadata {
    fn from(meta: &std::fs::Metadata) -> Self {
        Self {
            kind: NodeKind::of(meta),
            size: meta.len(),
            // Not every platform reports every timestamp.
            created: meta.created().ok().map(Into::into),
            modified: meta.modified().ok().map(Into::into),
            accessed: meta.accessed().ok().map(Into::into),
            readonly: meta.permissions().readonly(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let now = Utc::now();
        let meta = Metadata::new(NodeKind::File).with_size(42).with_modified(now);
        assert_eq!(meta.size, 42);
        assert_eq!(meta.modified, Some(now));
        assert!(meta.created.is_none());
    }

    #[test]
    fn test_from_std() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("five.txt");
        std::fs::write(&file, b"12345").unwrap();

        let meta = Metadata::from(&std::fs::metadata(&file).unwrap());
        assert_eq!(meta.kind, NodeKind::File);
        assert_eq!(meta.size, 5);
        assert!(meta.modified.is_some());
        assert!(!meta.readonly);
    }
}
