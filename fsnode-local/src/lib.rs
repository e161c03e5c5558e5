//! Local filesystem handles for fsnode
//!
//! File and directory handles over the OS filesystem, deterministic
//! pre-order traversal, and tree copy, move and delete built on it.

mod local;
pub mod directory;
pub mod file;
pub mod lister;
pub mod memory;
pub mod node;
pub mod recursive;
pub mod scan;
pub mod stream;
pub mod traverse;
pub mod tree;

pub use directory::Directory;
pub use file::File;
pub use local::{DirectorySource, LocalSource};
pub use memory::MemorySource;
pub use node::{create_node, AnyNode, Node};
pub use recursive::RecursiveDirectory;
pub use stream::FileStream;
pub use traverse::{flatten, list_recursive, RemovalPlan};
pub use tree::{copy_tree, move_tree, remove_contents};
