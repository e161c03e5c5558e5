//! Operation options

use crate::entry::{FlattenedEntry, NodeKind};
use crate::error::{FsError, FsResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::OpenOptions;

/// Which node kinds a listing keeps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Filter {
    #[default]
    All,
    OnlyFiles,
    OnlyDirectories,
}

impl Filter {
    pub fn matches(self, kind: NodeKind) -> bool {
        match self {
            Filter::All => true,
            Filter::OnlyFiles => kind.is_file(),
            Filter::OnlyDirectories => kind.is_directory(),
        }
    }

    /// Drop non-matching entries, keeping the order of the rest.
    pub fn apply(self, mut entries: Vec<FlattenedEntry>) -> Vec<FlattenedEntry> {
        if self != Filter::All {
            entries.retain(|e| self.matches(e.kind));
        }
        entries
    }
}

/// What a tree copy does when one entry fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorPolicy {
    /// Stop at the first failure. Whatever was already copied stays.
    #[default]
    FailFast,
    /// Keep copying, then report how many entries failed.
    Continue,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyOptions {
    pub on_error: ErrorPolicy,
}

impl CopyOptions {
    pub fn keep_going() -> Self {
        Self {
            on_error: ErrorPolicy::Continue,
        }
    }
}

/// fopen-style open modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpenMode {
    /// `r`
    Read,
    /// `r+`
    ReadWrite,
    /// `w`
    WriteTruncate,
    /// `w+`
    ReadWriteTruncate,
    /// `a`
    WriteAppend,
    /// `a+`
    ReadWriteAppend,
    /// `x`
    WriteFailIfExists,
    /// `x+`
    ReadWriteFailIfExists,
    /// `c`
    WriteStartPointer,
    /// `c+`
    ReadWriteStartPointer,
}

impl OpenMode {
    pub const ALL: [OpenMode; 10] = [
        OpenMode::Read,
        OpenMode::ReadWrite,
        OpenMode::WriteTruncate,
        OpenMode::ReadWriteTruncate,
        OpenMode::WriteAppend,
        OpenMode::ReadWriteAppend,
        OpenMode::WriteFailIfExists,
        OpenMode::ReadWriteFailIfExists,
        OpenMode::WriteStartPointer,
        OpenMode::ReadWriteStartPointer,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OpenMode::Read => "r",
            OpenMode::ReadWrite => "r+",
            OpenMode::WriteTruncate => "w",
            OpenMode::ReadWriteTruncate => "w+",
            OpenMode::WriteAppend => "a",
            OpenMode::ReadWriteAppend => "a+",
            OpenMode::WriteFailIfExists => "x",
            OpenMode::ReadWriteFailIfExists => "x+",
            OpenMode::WriteStartPointer => "c",
            OpenMode::ReadWriteStartPointer => "c+",
        }
    }

    pub fn parse(mode: &str) -> FsResult<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == mode)
            .ok_or_else(|| FsError::InvalidMode(mode.to_string()))
    }

    pub fn is_readable(self) -> bool {
        !matches!(
            self,
            OpenMode::WriteTruncate
                | OpenMode::WriteAppend
                | OpenMode::WriteFailIfExists
                | OpenMode::WriteStartPointer
        )
    }

    pub fn is_writable(self) -> bool {
        self != OpenMode::Read
    }

    pub fn open_options(self) -> OpenOptions {
        let mut opts = OpenOptions::new();
        opts.read(self.is_readable());
        match self {
            OpenMode::Read => {}
            OpenMode::ReadWrite => {
                opts.write(true);
            }
            OpenMode::WriteTruncate | OpenMode::ReadWriteTruncate => {
                opts.write(true).create(true).truncate(true);
            }
            OpenMode::WriteAppend | OpenMode::ReadWriteAppend => {
                opts.append(true).create(true);
            }
            OpenMode::WriteFailIfExists | OpenMode::ReadWriteFailIfExists => {
                opts.write(true).create_new(true);
            }
            OpenMode::WriteStartPointer | OpenMode::ReadWriteStartPointer => {
                opts.write(true).create(true);
            }
        }
        opts
    }
}

impl fmt::Display for OpenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample() -> Vec<FlattenedEntry> {
        vec![
            FlattenedEntry::file("/t/b.txt"),
            FlattenedEntry::directory("/t/z"),
            FlattenedEntry::file("/t/z/a.txt"),
            FlattenedEntry::directory("/t/a"),
        ]
    }

    #[test]
    fn test_filter_all_keeps_everything() {
        assert_eq!(Filter::All.apply(sample()), sample());
    }

    #[test]
    fn test_filter_keeps_relative_order() {
        let files: Vec<PathBuf> = Filter::OnlyFiles
            .apply(sample())
            .into_iter()
            .map(|e| e.path)
            .collect();
        assert_eq!(files, vec![PathBuf::from("/t/b.txt"), PathBuf::from("/t/z/a.txt")]);

        let dirs: Vec<PathBuf> = Filter::OnlyDirectories
            .apply(sample())
            .into_iter()
            .map(|e| e.path)
            .collect();
        assert_eq!(dirs, vec![PathBuf::from("/t/z"), PathBuf::from("/t/a")]);
    }

    #[test]
    fn test_filter_default() {
        assert_eq!(Filter::default(), Filter::All);
    }

    #[test]
    fn test_open_mode_parse_round_trip() {
        for mode in OpenMode::ALL {
            assert_eq!(OpenMode::parse(mode.as_str()).unwrap(), mode);
        }
        assert!(OpenMode::parse("rw").is_err());
    }

    #[test]
    fn test_open_mode_capabilities() {
        assert!(OpenMode::Read.is_readable());
        assert!(!OpenMode::Read.is_writable());
        assert!(!OpenMode::WriteAppend.is_readable());
        assert!(OpenMode::ReadWriteAppend.is_readable());
        assert!(OpenMode::WriteFailIfExists.is_writable());
    }

    #[test]
    fn test_copy_options_default_fails_fast() {
        assert_eq!(CopyOptions::default().on_error, ErrorPolicy::FailFast);
        assert_eq!(CopyOptions::keep_going().on_error, ErrorPolicy::Continue);
    }
}
