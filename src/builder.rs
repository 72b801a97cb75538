//! Builds a directory tree from a flat list of coverage records.
//!
//! Paths are split on `/` only. A leading `/` is kept as its own segment so
//! absolute paths round-trip, and empty or `.` segments are ignored.

use std::collections::HashMap;

use log::debug;

use crate::model::CoverageRecord;
use crate::tree::{HierarchicalReport, NodeId, Tree};

/// Name given to the root directory when the input paths share no prefix.
pub const ROOT_FALLBACK_NAME: &str = "root";

/// Build the hierarchical report for `records`.
///
/// Children keep the order in which their first file appeared, and each
/// distinct directory path yields exactly one node.
pub fn build(records: &[CoverageRecord]) -> HierarchicalReport {
    if records.is_empty() {
        return HierarchicalReport::new(Tree::new("", ""));
    }

    let split: Vec<Vec<&str>> = records.iter().map(|r| split_path(r.filename())).collect();
    let root_segments = common_segments(&split);
    let root_path = join_path(&root_segments);
    let root_name = match root_segments.last() {
        Some(&segment) if segment != "/" => segment,
        _ => ROOT_FALLBACK_NAME,
    };
    debug!(
        "common root '{}' across {} files (root node '{}')",
        root_path,
        records.len(),
        root_name
    );

    let mut tree = Tree::new(root_name, root_path.clone());
    let mut directories: HashMap<String, NodeId> = HashMap::new();
    directories.insert(root_path.clone(), tree.root_id());

    for (record, parts) in records.iter().zip(&split) {
        // Only malformed input can produce a path outside the common root.
        let relative = parts
            .strip_prefix(root_segments.as_slice())
            .unwrap_or(parts.as_slice());
        let (file_name, dir_segments) = match relative.split_last() {
            Some((name, dirs)) => (*name, dirs),
            None => (parts.last().copied().unwrap_or(""), &[][..]),
        };

        let mut current = tree.root_id();
        let mut current_path = root_path.clone();
        for segment in dir_segments {
            let dir_path = join_segment(&current_path, segment);
            current = match directories.get(&dir_path) {
                Some(&id) => id,
                None => {
                    let id = tree.add_directory(current, *segment, dir_path.clone());
                    directories.insert(dir_path.clone(), id);
                    id
                }
            };
            current_path = dir_path;
        }

        tree.add_file(current, file_name, record.clone());
    }

    debug!(
        "built coverage tree: {} nodes, {} directories",
        tree.len(),
        directories.len()
    );
    HierarchicalReport::new(tree)
}

/// Longest directory prefix shared by every filename.
///
/// A single filename yields its parent directory. Returns an empty string
/// when the paths diverge at their first segment.
pub fn common_root<S: AsRef<str>>(filenames: &[S]) -> String {
    let split: Vec<Vec<&str>> = filenames.iter().map(|f| split_path(f.as_ref())).collect();
    join_path(&common_segments(&split))
}

fn common_segments<'a>(paths: &[Vec<&'a str>]) -> Vec<&'a str> {
    match paths {
        [] => Vec::new(),
        [only] => only[..only.len().saturating_sub(1)].to_vec(),
        [first, rest @ ..] => {
            let shortest = paths.iter().map(Vec::len).min().unwrap_or(0);
            (0..shortest)
                .take_while(|&i| rest.iter().all(|p| p[i] == first[i]))
                .map(|i| first[i])
                .collect()
        }
    }
}

fn split_path(path: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    if path.starts_with('/') {
        parts.push("/");
    }
    parts.extend(path.split('/').filter(|s| !s.is_empty() && *s != "."));
    parts
}

fn join_path(parts: &[&str]) -> String {
    match parts.split_first() {
        None => String::new(),
        Some((&"/", rest)) => format!("/{}", rest.join("/")),
        Some(_) => parts.join("/"),
    }
}

fn join_segment(base: &str, segment: &str) -> String {
    if base.is_empty() {
        segment.to_string()
    } else if base.ends_with('/') {
        format!("{base}{segment}")
    } else {
        format!("{base}/{segment}")
    }
}
