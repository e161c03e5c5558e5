//! Syntactic file/directory classification
//!
//! Classification never touches the filesystem: a path that does not exist
//! yet is classified exactly like one that does.

use crate::entry::NodeKind;
use crate::error::{FsError, FsResult};

/// Platform separator every normalised path uses
pub const SEPARATOR: char = std::path::MAIN_SEPARATOR;

pub(crate) fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Last segment of `path`, empty when `path` ends with a separator.
pub fn final_segment(path: &str) -> &str {
    path.rsplit(is_separator).next().unwrap_or("")
}

/// Byte offsets of the dots in `segment` that are neither its first nor its
/// last character.
fn interior_dots(segment: &str) -> Vec<usize> {
    let last = segment.len().saturating_sub(1);
    segment
        .match_indices('.')
        .map(|(i, _)| i)
        .filter(|&i| i != 0 && i != last)
        .collect()
}

/// Extension of a file segment, the text after its single interior dot.
pub(crate) fn segment_extension(segment: &str) -> Option<&str> {
    match interior_dots(segment).as_slice() {
        [dot] => Some(&segment[dot + 1..]),
        _ => None,
    }
}

/// Decides whether a path string names a file or a directory.
pub trait PathClassifier {
    fn classify(&self, path: &str) -> FsResult<NodeKind>;
}

/// Default heuristic.
///
/// A trailing separator always means a directory. Otherwise the final
/// segment decides: no interior dot is a directory, exactly one is a file,
/// more than one is rejected as ambiguous (`file.tar.gz`, `a.b.c`).
///
/// Directory names containing a dot (`archive.old`) come out as files.
#[derive(Debug, Clone, Copy, Default)]
pub struct DotHeuristic;

impl PathClassifier for DotHeuristic {
    fn classify(&self, path: &str) -> FsResult<NodeKind> {
        if path.is_empty() {
            return Err(FsError::InvalidPath("empty path".into()));
        }
        if path.ends_with(is_separator) {
            return Ok(NodeKind::Directory);
        }

        match interior_dots(final_segment(path)).len() {
            0 => Ok(NodeKind::Directory),
            1 => Ok(NodeKind::File),
            _ => Err(FsError::AmbiguousClassification(path.to_string())),
        }
    }
}

/// Strict classifier: only a trailing separator makes a directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrailingSeparator;

impl PathClassifier for TrailingSeparator {
    fn classify(&self, path: &str) -> FsResult<NodeKind> {
        if path.is_empty() {
            return Err(FsError::InvalidPath("empty path".into()));
        }
        if path.ends_with(is_separator) {
            Ok(NodeKind::Directory)
        } else {
            Ok(NodeKind::File)
        }
    }
}

/// Classify with the default heuristic.
pub fn classify(path: &str) -> FsResult<NodeKind> {
    DotHeuristic.classify(path)
}

/// Replace every `/` and `\` with [`SEPARATOR`].
pub fn normalize_separators(path: &str) -> String {
    path.chars()
        .map(|c| if is_separator(c) { SEPARATOR } else { c })
        .collect()
}

/// Join pieces with [`SEPARATOR`], verbatim.
pub fn join_path<I, S>(pieces: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut joined = String::new();
    for (i, piece) in pieces.into_iter().enumerate() {
        if i > 0 {
            joined.push(SEPARATOR);
        }
        joined.push_str(piece.as_ref());
    }
    joined
}
