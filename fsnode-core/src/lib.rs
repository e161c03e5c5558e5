//! fsnode core
//!
//! Path classification, node kinds, listing filters and the error type shared
//! by the filesystem handles.

pub mod classify;
pub mod entry;
pub mod error;
pub mod metadata;
pub mod operations;
pub mod path;

pub use classify::{classify, join_path, normalize_separators, DotHeuristic, PathClassifier, TrailingSeparator, SEPARATOR};
pub use entry::{FlattenedEntry, NodeKind};
pub use error::{FsError, FsResult};
pub use metadata::Metadata;
pub use operations::{CopyOptions, ErrorPolicy, Filter, OpenMode};
pub use path::{normalize, NodePath};
