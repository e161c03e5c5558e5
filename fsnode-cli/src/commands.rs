// SPDX-License-Identifier: AGPL-3.0-or-later
//! CLI command implementations

use chrono::{DateTime, Utc};
use console::style;
use fsnode_core::{
    CopyOptions, Filter, FlattenedEntry, FsError, FsResult, NodeKind, NodePath, OpenMode,
    TrailingSeparator,
};
use fsnode_local::{scan, AnyNode, Directory, File, Node, RecursiveDirectory};
use std::path::Path;
use tabled::{Table, Tabled};
use tracing::debug;

fn copy_options(keep_going: bool) -> CopyOptions {
    if keep_going {
        CopyOptions::keep_going()
    } else {
        CopyOptions::default()
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> FsResult<()> {
    let text = serde_json::to_string_pretty(value).map_err(|e| FsError::Io(e.into()))?;
    println!("{text}");
    Ok(())
}

/// Format a timestamp for display
fn format_time(dt: Option<DateTime<Utc>>) -> String {
    dt.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn format_size(size: u64, human: bool) -> String {
    if human {
        bytesize::ByteSize(size).to_string()
    } else {
        size.to_string()
    }
}

fn format_kind(kind: NodeKind) -> String {
    match kind {
        NodeKind::Directory => style("d").cyan().to_string(),
        NodeKind::File => "-".to_string(),
    }
}

/// Path of `entry` below `root`, indented one level per component.
fn tree_line(entry: &FlattenedEntry, root: &Path) -> String {
    let relative = entry.path.strip_prefix(root).unwrap_or(&entry.path);
    let depth = relative.components().count().saturating_sub(1);
    let name = entry.name().unwrap_or("?");
    let suffix = if entry.is_directory() {
        std::path::MAIN_SEPARATOR.to_string()
    } else {
        String::new()
    };
    format!("{}{name}{suffix}", "  ".repeat(depth))
}

#[derive(Tabled)]
struct LsEntry {
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Modified")]
    modified: String,
    #[tabled(rename = "Name")]
    name: String,
}

/// List directory contents
pub fn ls(path: &str, filter: Filter, long: bool, human: bool, json: bool) -> FsResult<()> {
    let dir = Directory::bind(path)?;
    debug!(path = %dir, ?filter, "listing");
    let entries = dir.entries(filter)?;

    if json {
        return print_json(&entries);
    }

    if entries.is_empty() {
        println!("(empty directory)");
        return Ok(());
    }

    if long {
        let mut rows = Vec::with_capacity(entries.len());
        for entry in &entries {
            let meta = AnyNode::bind(&entry.path)?.metadata()?;
            rows.push(LsEntry {
                kind: format_kind(entry.kind),
                size: format_size(meta.size, human),
                modified: format_time(meta.modified),
                name: entry.name().unwrap_or("?").to_string(),
            });
        }
        println!("{}", Table::new(rows));
    } else {
        for entry in &entries {
            let name = entry.name().unwrap_or("?");
            if entry.is_directory() {
                println!("{}", style(name).cyan());
            } else {
                println!("{name}");
            }
        }
    }

    Ok(())
}

/// Recursive listing in traversal order
pub fn tree(path: &str, filter: Filter, json: bool) -> FsResult<()> {
    let rec = RecursiveDirectory::open(path)?;
    let entries = rec.entries(filter)?;

    if json {
        return print_json(&entries);
    }

    println!("{}", style(rec.root().display()).bold());
    for entry in &entries {
        println!("{}", tree_line(entry, rec.root()));
    }
    Ok(())
}

/// Print the kind each path string would be given
pub fn classify(paths: &[String], strict: bool, json: bool) -> FsResult<()> {
    let mut results = Vec::with_capacity(paths.len());
    for raw in paths {
        let parsed = if strict {
            NodePath::parse_with(&TrailingSeparator, raw)
        } else {
            NodePath::parse(raw)
        };
        results.push((raw, parsed));
    }

    if json {
        let rows: Vec<serde_json::Value> = results
            .iter()
            .map(|(raw, parsed)| match parsed {
                Ok(p) => serde_json::json!({
                    "input": raw,
                    "kind": p.kind(),
                    "normalized": p.as_str(),
                    "extension": p.extension().ok(),
                }),
                Err(e) => serde_json::json!({ "input": raw, "error": e.to_string() }),
            })
            .collect();
        return print_json(&rows);
    }

    for (raw, parsed) in &results {
        match parsed {
            Ok(p) => match p.extension() {
                Ok(ext) if !ext.is_empty() => {
                    println!("{:<10} {} (.{ext})", style(p.kind()).green(), p)
                }
                _ => println!("{:<10} {}", style(p.kind()).green(), p),
            },
            Err(e) => println!("{:<10} {raw}: {e}", style("invalid").red()),
        }
    }
    Ok(())
}

/// Display file contents
pub fn cat(path: &str) -> FsResult<()> {
    let file = File::bind(path)?;
    let mut stream = file.open(OpenMode::Read)?;
    print!("{}", stream.read_to_string()?);
    stream.close()
}

/// Copy a file or a directory tree
pub fn cp(source: &str, dest: &str, keep_going: bool) -> FsResult<()> {
    let copied = match AnyNode::bind(source)? {
        AnyNode::File(file) => file.copy(dest)?.path().to_path_buf(),
        AnyNode::Directory(dir) => dir.copy_with(dest, &copy_options(keep_going))?.path().to_path_buf(),
    };
    println!("Copied {} -> {}", source, copied.display());
    Ok(())
}

/// Move a file or a directory tree
pub fn mv(source: &str, dest: &str, keep_going: bool) -> FsResult<()> {
    let moved = match AnyNode::bind(source)? {
        AnyNode::File(file) => file.move_to(dest)?.path().to_path_buf(),
        AnyNode::Directory(dir) => dir.move_with(dest, &copy_options(keep_going))?.path().to_path_buf(),
    };
    println!("Moved {} -> {}", source, moved.display());
    Ok(())
}

/// Remove files or directories
pub fn rm(paths: &[String], recursive: bool, contents: bool) -> FsResult<()> {
    for path in paths {
        match AnyNode::bind(path)? {
            AnyNode::File(file) => {
                file.delete()?;
            }
            AnyNode::Directory(dir) if recursive => scan::remove_dir_all(dir.path())?,
            AnyNode::Directory(dir) if contents => {
                dir.recursive().delete()?;
            }
            AnyNode::Directory(dir) => {
                return Err(FsError::NotAFile(format!(
                    "{} (use -r to remove it, or --contents to empty it)",
                    dir
                )));
            }
        }
        println!("Removed {}", path);
    }
    Ok(())
}

/// Create directories
pub fn mkdir(paths: &[String]) -> FsResult<()> {
    for path in paths {
        let dir = Directory::create(&NodePath::directory(path)?)?;
        println!("Created {}", dir);
    }
    Ok(())
}

/// Create empty files; existing files are left untouched
pub fn touch(paths: &[String]) -> FsResult<()> {
    for path in paths {
        match File::create(&NodePath::file(path)?) {
            Ok(file) => println!("Created {}", file),
            Err(FsError::AlreadyExists(_)) => debug!(path = %path, "already exists"),
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

/// Show file/directory information
pub fn stat(path: &str, json: bool) -> FsResult<()> {
    let node = AnyNode::bind(path)?;
    let meta = node.metadata()?;

    if json {
        return print_json(&meta);
    }

    println!("  Path: {}", node);
    println!("  Type: {}", meta.kind);
    println!("  Size: {} ({})", meta.size, bytesize::ByteSize(meta.size));
    if let AnyNode::File(file) = &node {
        println!("  Extension: {}", file.extension());
    }
    println!("  Modified: {}", format_time(meta.modified));
    println!("  Created: {}", format_time(meta.created));
    println!("  Read-only: {}", meta.readonly);
    Ok(())
}
